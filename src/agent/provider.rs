//! Structured completion provider interface.
//!
//! A provider turns one [`CompletionRequest`] into the raw text the model
//! produced. Parsing and schema validation happen in the binding, so a
//! provider only reports transport-level failures.

use crate::config::SamplingProfile;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the request conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Everything a provider needs to issue one model call.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    /// Model identifier as configured (may carry a `provider:` prefix).
    pub model: &'a str,
    pub sampling: &'a SamplingProfile,
    pub system_instruction: &'a str,
    /// JSON schema the output must satisfy.
    pub output_schema: &'a serde_json::Value,
    /// The prompt, followed by rejected outputs and corrections on retries.
    pub turns: &'a [Turn],
}

impl CompletionRequest<'_> {
    /// The caller's original prompt.
    pub fn prompt(&self) -> &str {
        self.turns.first().map_or("", |turn| turn.content.as_str())
    }

    /// Zero for the first attempt, then one per schema retry.
    pub fn retry_number(&self) -> usize {
        self.turns.len().saturating_sub(1) / 2
    }
}

/// A backend able to answer structured completion requests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Issue the request and return the model's raw text output.
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String>;
}

#[async_trait]
impl<P: CompletionProvider + ?Sized> CompletionProvider for std::sync::Arc<P> {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        (**self).complete(request).await
    }
}
