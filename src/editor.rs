//! Card editor: rewrites free-form card text into a validated trend card.
//!
//! The editor's system prompt takes a `{word_limit}` placeholder that is
//! filled once at construction, so every edit in a session targets the same
//! section length. Input text goes to the model as-is.

use crate::agent::prompt::{render_template, vars};
use crate::agent::{AgentBinding, CompletionProvider};
use crate::card::TrendCard;
use crate::config::{AgentConfig, AgentConfiguration, EDITOR_CONFIG_FILE, load_config};
use crate::error::Result;
use tracing::info;

/// Edits existing trend card text.
#[derive(Debug)]
pub struct CardEditor<P> {
    binding: AgentBinding<P>,
    word_limit: u32,
}

impl<P: CompletionProvider> CardEditor<P> {
    /// Build an editor from a base config, an optional override, and the
    /// per-section word limit.
    pub fn new(
        config: AgentConfig,
        overrides: Option<&AgentConfiguration>,
        word_limit: u32,
        provider: P,
    ) -> Result<Self> {
        let mut config = config.with_overrides(overrides);
        config.system_prompt = render_template(
            &config.system_prompt,
            &vars([("word_limit", word_limit.to_string())]),
        )?;
        config.validate()?;

        Ok(Self {
            binding: AgentBinding::new(&config, provider),
            word_limit,
        })
    }

    /// Locate `trend_card_editor.yaml` under `config_dir` and build an editor.
    pub fn load(
        config_dir: &str,
        overrides: Option<&AgentConfiguration>,
        word_limit: u32,
        provider: P,
    ) -> Result<Self> {
        let config = load_config(EDITOR_CONFIG_FILE, config_dir)?;
        Self::new(config, overrides, word_limit, provider)
    }

    pub fn model(&self) -> &str {
        self.binding.model()
    }

    pub fn word_limit(&self) -> u32 {
        self.word_limit
    }

    pub fn binding(&self) -> &AgentBinding<P> {
        &self.binding
    }

    /// Edit one card's text.
    pub async fn edit(&self, text: &str) -> Result<TrendCard> {
        info!(chars = text.len(), word_limit = self.word_limit, "editing trend card");
        self.binding.run(text).await
    }
}
