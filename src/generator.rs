//! Card generator: fills the generator prompt template from card inputs and
//! asks the bound agent for a card.

use crate::agent::prompt::{render_template, require_placeholders, vars};
use crate::agent::{AgentBinding, CompletionProvider};
use crate::card::{TrendCard, TrendCardInput};
use crate::config::{AgentConfig, AgentConfiguration, GENERATOR_CONFIG_FILE, load_config};
use crate::error::{Result, TrendCardError};
use tracing::info;

/// Placeholders every generator template must contain.
pub const REQUIRED_PLACEHOLDERS: [&str; 2] = ["industry_segment", "topic"];

/// Substituted for `{component}` when the input leaves it open.
pub const UNSPECIFIED_COMPONENT: &str =
    "the most relevant STEEL component (Social, Technical, Economic, Environmental, or Legal)";

/// Generates trend cards from structured inputs.
#[derive(Debug)]
pub struct CardGenerator<P> {
    binding: AgentBinding<P>,
    prompt_template: String,
}

impl<P: CompletionProvider> CardGenerator<P> {
    /// Build a generator from a base config and an optional override.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if the config has no generator prompt
    /// - `TemplateSubstitution` if the template lacks a required placeholder
    pub fn new(
        config: AgentConfig,
        overrides: Option<&AgentConfiguration>,
        provider: P,
    ) -> Result<Self> {
        let config = config.with_overrides(overrides);
        config.validate()?;

        let prompt_template = config.generator_prompt()?.to_string();
        require_placeholders(&prompt_template, &REQUIRED_PLACEHOLDERS)?;

        Ok(Self {
            binding: AgentBinding::new(&config, provider),
            prompt_template,
        })
    }

    /// Locate `trend_card_agent.yaml` under `config_dir` and build a generator.
    pub fn load(
        config_dir: &str,
        overrides: Option<&AgentConfiguration>,
        provider: P,
    ) -> Result<Self> {
        let config = load_config(GENERATOR_CONFIG_FILE, config_dir)?;
        Self::new(config, overrides, provider)
    }

    pub fn model(&self) -> &str {
        self.binding.model()
    }

    pub fn binding(&self) -> &AgentBinding<P> {
        &self.binding
    }

    /// Fill the prompt template from `inputs`.
    pub fn render_prompt(&self, inputs: &TrendCardInput) -> Result<String> {
        for (name, value) in [
            ("industry_segment", &inputs.industry_segment),
            ("topic", &inputs.topic),
        ] {
            if value.trim().is_empty() {
                return Err(TrendCardError::TemplateSubstitution(format!(
                    "input field '{}' is empty",
                    name
                )));
            }
        }

        let component = inputs
            .component
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(UNSPECIFIED_COMPONENT);
        let variables = vars([
            ("industry_segment", inputs.industry_segment.clone()),
            ("topic", inputs.topic.clone()),
            ("component", component.to_string()),
            ("word_limit", inputs.word_limit.to_string()),
        ]);

        Ok(render_template(&self.prompt_template, &variables)?)
    }

    /// Generate one card. The model's card is returned unchanged.
    pub async fn generate(&self, inputs: &TrendCardInput) -> Result<TrendCard> {
        let prompt = self.render_prompt(inputs)?;
        info!(
            topic = %inputs.topic,
            component = inputs.component.as_deref().unwrap_or("(model choice)"),
            "generating trend card"
        );
        self.binding.run(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DirGuard, ScriptedProvider, card_json, sample_config};
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn generator(provider: ScriptedProvider) -> CardGenerator<ScriptedProvider> {
        CardGenerator::new(sample_config("gpt-4o"), None, provider).unwrap()
    }

    #[tokio::test]
    async fn test_prompt_passed_verbatim_to_provider() {
        let g = generator(ScriptedProvider::new().respond(card_json("Embedded Finance / Economic")));
        let inputs = TrendCardInput::new("Fintech", "Embedded Finance")
            .with_component("Economic")
            .with_word_limit(30);

        let card = g.generate(&inputs).await.unwrap();

        assert_eq!(card.card_identifier, "Embedded Finance / Economic");
        assert_eq!(
            g.binding().provider().prompts(),
            vec!["Fintech|Embedded Finance|Economic|30".to_string()]
        );
    }

    #[tokio::test]
    async fn test_card_returned_unchanged() {
        let raw = card_json("Embedded Finance / Economic");
        let g = generator(ScriptedProvider::new().respond(raw.clone()));
        let inputs = TrendCardInput::new("Fintech", "Embedded Finance").with_component("Economic");

        let card = g.generate(&inputs).await.unwrap();

        assert_eq!(card, crate::agent::parse_card(&raw).unwrap());
    }

    #[test]
    fn test_missing_component_lets_model_choose() {
        let g = generator(ScriptedProvider::new());
        let prompt = g
            .render_prompt(&TrendCardInput::new("Fintech", "Embedded Finance"))
            .unwrap();
        assert_eq!(
            prompt,
            format!("Fintech|Embedded Finance|{}|40", UNSPECIFIED_COMPONENT)
        );
    }

    #[test]
    fn test_empty_input_field_is_rejected() {
        let g = generator(ScriptedProvider::new());
        let err = g
            .render_prompt(&TrendCardInput::new("Fintech", "  "))
            .unwrap_err();
        assert!(matches!(err, TrendCardError::TemplateSubstitution(_)));
        assert!(err.to_string().contains("topic"));
    }

    #[test]
    fn test_template_missing_required_placeholder() {
        let mut config = sample_config("gpt-4o");
        config.generator_prompt = Some("Only {topic}".to_string());

        let err = CardGenerator::new(config, None, ScriptedProvider::new()).unwrap_err();

        assert!(matches!(err, TrendCardError::TemplateSubstitution(_)));
        assert!(err.to_string().contains("industry_segment"));
    }

    #[test]
    fn test_template_with_unknown_placeholder_fails_at_render() {
        let mut config = sample_config("gpt-4o");
        config.generator_prompt = Some("{industry_segment} {topic} {region}".to_string());
        let g = CardGenerator::new(config, None, ScriptedProvider::new()).unwrap();

        let err = g
            .render_prompt(&TrendCardInput::new("Fintech", "Embedded Finance"))
            .unwrap_err();

        assert!(err.to_string().contains("region"));
    }

    #[test]
    fn test_config_without_generator_prompt() {
        let mut config = sample_config("gpt-4o");
        config.generator_prompt = None;

        let err = CardGenerator::new(config, None, ScriptedProvider::new()).unwrap_err();

        assert!(matches!(err, TrendCardError::InvalidConfiguration(_)));
    }

    #[tokio::test]
    async fn test_override_changes_model_and_temperature() {
        let overrides = AgentConfiguration::new("gemini-x", 1.2).unwrap();
        let g = CardGenerator::new(
            sample_config("gpt-4o"),
            Some(&overrides),
            ScriptedProvider::new().respond(card_json("A / B")),
        )
        .unwrap();

        g.generate(&TrendCardInput::new("Fintech", "A").with_component("B"))
            .await
            .unwrap();

        let request = &g.binding().provider().requests()[0];
        assert_eq!(request.model, "gemini-x");
        assert_eq!(request.sampling.temperature(), 1.2);
        assert!(request.sampling.is_gemini());
        assert_eq!(request.system_instruction, "You write trend cards.");
    }

    #[test]
    #[serial]
    fn test_load_finds_generator_config() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("config");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(GENERATOR_CONFIG_FILE),
            "model: gpt-4o\nsystem_prompt: s\ngenerator_prompt: \"{industry_segment}/{topic}\"\n",
        )
        .unwrap();
        let _guard = DirGuard::new(temp.path());

        let g = CardGenerator::load("config", None, ScriptedProvider::new()).unwrap();

        assert_eq!(g.model(), "gpt-4o");
    }

    #[test]
    #[serial]
    fn test_load_without_config_dir() {
        let temp = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp.path());

        let err = CardGenerator::load("no_such_trendcard_config", None, ScriptedProvider::new())
            .unwrap_err();

        assert!(matches!(err, TrendCardError::ConfigurationNotFound { .. }));
    }
}
