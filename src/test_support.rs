use crate::agent::{CompletionProvider, CompletionRequest, Turn};
use crate::config::{AgentConfig, SamplingProfile};
use crate::error::{Result, TrendCardError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Owned copy of a request seen by [`ScriptedProvider`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub model: String,
    pub sampling: SamplingProfile,
    pub system_instruction: String,
    pub prompt: String,
    pub turns: Vec<Turn>,
}

/// In-memory provider that replays canned outputs in order and records
/// every request it receives.
#[derive(Debug, Default)]
pub(crate) struct ScriptedProvider {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a raw model output.
    pub(crate) fn respond(self, output: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(output.into()));
        self
    }

    /// Queue a provider failure.
    pub(crate) fn fail(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Err(message.into()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.prompt).collect()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        self.requests.lock().unwrap().push(RecordedRequest {
            model: request.model.to_string(),
            sampling: *request.sampling,
            system_instruction: request.system_instruction.to_string(),
            prompt: request.prompt().to_string(),
            turns: request.turns.to_vec(),
        });

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(output)) => Ok(output),
            Some(Err(message)) => Err(TrendCardError::Provider(message)),
            None => Err(TrendCardError::Provider("script exhausted".to_string())),
        }
    }
}

/// A schema-conformant model output for the given identifier.
pub(crate) fn card_json(identifier: &str) -> String {
    serde_json::json!({
        "card_identifier": identifier,
        "title": format!("Title for {identifier}"),
        "description": "Gen Z isn't waiting.",
        "implications": "Incumbents lose the customer interface.",
        "opportunities": "Bundle services where customers already are.",
        "challenges_threats": "Regulators are watching closely."
    })
    .to_string()
}

/// A minimal valid config for the given model.
pub(crate) fn sample_config(model: &str) -> AgentConfig {
    let yaml = format!(
        "model: {model}\n\
         system_prompt: \"You write trend cards.\"\n\
         prompt_template: \"{{industry_segment}}|{{topic}}|{{component}}|{{word_limit}}\"\n"
    );
    AgentConfig::from_yaml(&yaml).unwrap()
}
