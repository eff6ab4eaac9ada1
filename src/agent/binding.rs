//! Agent binding: one model, one system instruction, one output schema.
//!
//! The binding is built once from a resolved [`AgentConfig`] and then answers
//! any number of prompts. Each [`AgentBinding::run`] is one logical request:
//!
//! 1. Send the prompt to the provider
//! 2. Parse the output as a [`TrendCard`] and check every field is non-empty
//! 3. On a schema failure, send the rejected output back with a correction
//!    and try again, up to `generator_retries` more times
//!
//! Provider errors are returned as-is on the first occurrence.

use super::provider::{CompletionProvider, CompletionRequest, Turn};
use crate::card::TrendCard;
use crate::config::{AgentConfig, SamplingProfile};
use crate::error::{Result, TrendCardError};
use tracing::{debug, warn};

/// A request capability bound to a model, its sampling profile, a system
/// instruction, and the trend card schema.
#[derive(Debug)]
pub struct AgentBinding<P> {
    provider: P,
    model: String,
    sampling: SamplingProfile,
    system_instruction: String,
    output_schema: serde_json::Value,
    retries: u32,
}

impl<P: CompletionProvider> AgentBinding<P> {
    /// Bind a provider to a resolved config.
    ///
    /// The sampling profile is chosen here, once, from the model identifier.
    pub fn new(config: &AgentConfig, provider: P) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            sampling: config.sampling_profile(),
            system_instruction: config.system_prompt.clone(),
            output_schema: TrendCard::json_schema(),
            retries: config.effective_retries(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn sampling(&self) -> &SamplingProfile {
        &self.sampling
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Schema retries allowed after the first attempt.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run one prompt and return a validated card.
    ///
    /// # Errors
    ///
    /// - `TrendCardError::Provider` as soon as the provider fails
    /// - `TrendCardError::SchemaValidation` once every attempt produced
    ///   output that does not fit the schema
    pub async fn run(&self, prompt: &str) -> Result<TrendCard> {
        let max_attempts = self.retries.saturating_add(1);
        let mut turns = vec![Turn::user(prompt)];
        let mut attempt = 0;

        loop {
            attempt += 1;
            let request = CompletionRequest {
                model: &self.model,
                sampling: &self.sampling,
                system_instruction: &self.system_instruction,
                output_schema: &self.output_schema,
                turns: &turns,
            };

            debug!(model = %self.model, attempt, "sending prompt");
            let raw = self.provider.complete(&request).await?;

            match parse_card(&raw) {
                Ok(card) => {
                    debug!(card = %card.card_identifier, attempt, "model output validated");
                    return Ok(card);
                }
                Err(message) if attempt < max_attempts => {
                    warn!(attempt, max_attempts, error = %message, "model output rejected, retrying");
                    turns.push(Turn::assistant(raw));
                    turns.push(Turn::user(correction_prompt(&message)));
                }
                Err(message) => {
                    return Err(TrendCardError::SchemaValidation {
                        attempts: attempt,
                        message,
                    });
                }
            }
        }
    }
}

/// Parse raw model output into a validated card.
///
/// Accepts bare JSON or JSON wrapped in a Markdown code fence.
pub fn parse_card(raw: &str) -> std::result::Result<TrendCard, String> {
    let json = strip_code_fence(raw);
    let card: TrendCard =
        serde_json::from_str(json).map_err(|e| format!("output is not a valid trend card: {}", e))?;
    card.validate()?;
    Ok(card)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let inner = inner.split_once('\n').map_or("", |(_, rest)| rest);
    inner.trim_end().trim_end_matches("```").trim()
}

fn correction_prompt(message: &str) -> String {
    format!(
        "Validation error: {}\n\nFix the errors and respond again with a single JSON object \
         containing every required field of the trend card.",
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::provider::Role;
    use crate::test_support::{ScriptedProvider, card_json, sample_config};

    #[test]
    fn test_parse_card_plain_json() {
        let card = parse_card(&card_json("A / Social")).unwrap();
        assert_eq!(card.card_identifier, "A / Social");
    }

    #[test]
    fn test_parse_card_fenced_json() {
        let raw = format!("```json\n{}\n```", card_json("A / Social"));
        let card = parse_card(&raw).unwrap();
        assert_eq!(card.title, "Title for A / Social");
    }

    #[test]
    fn test_parse_card_rejects_empty_field() {
        let raw = card_json("A / Social").replace("Title for A / Social", "");
        let err = parse_card(&raw).unwrap_err();
        assert!(err.contains("title"));
    }

    #[test]
    fn test_parse_card_rejects_non_json() {
        assert!(parse_card("Sure! Here is your card.").is_err());
    }

    #[test]
    fn test_binding_reads_config() {
        let config = sample_config("gemini-2.5-flash");
        let binding = AgentBinding::new(&config, ScriptedProvider::new());

        assert_eq!(binding.model(), "gemini-2.5-flash");
        assert!(binding.sampling().is_gemini());
        assert_eq!(binding.system_instruction(), config.system_prompt);
        assert_eq!(binding.retries(), 3);
    }

    #[tokio::test]
    async fn test_run_returns_first_valid_card() {
        let provider = ScriptedProvider::new().respond(card_json("Embedded Finance / Economic"));
        let binding = AgentBinding::new(&sample_config("gpt-4o"), provider);

        let card = binding.run("the prompt").await.unwrap();

        assert_eq!(card.card_identifier, "Embedded Finance / Economic");
        let requests = binding.provider().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "the prompt");
        assert_eq!(requests[0].system_instruction, "You write trend cards.");
    }

    #[tokio::test]
    async fn test_run_retries_on_schema_failure() {
        let provider = ScriptedProvider::new()
            .respond("not json")
            .respond(r#"{"card_identifier": "x"}"#)
            .respond(card_json("A / Legal"));
        let binding = AgentBinding::new(&sample_config("gpt-4o"), provider);

        let card = binding.run("prompt").await.unwrap();

        assert_eq!(card.card_identifier, "A / Legal");
        let requests = binding.provider().requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].turns.len(), 1);
        assert_eq!(requests[2].turns.len(), 5);
        assert_eq!(requests[2].turns[1].role, Role::Assistant);
        assert_eq!(requests[2].turns[1].content, "not json");
        assert!(requests[2].turns[2].content.starts_with("Validation error:"));
    }

    #[tokio::test]
    async fn test_run_gives_up_after_retry_budget() {
        let mut config = sample_config("gpt-4o");
        config.generator_retries = Some(2);
        let provider = ScriptedProvider::new()
            .respond("bad 1")
            .respond("bad 2")
            .respond("bad 3")
            .respond(card_json("never reached"));
        let binding = AgentBinding::new(&config, provider);

        let err = binding.run("prompt").await.unwrap_err();

        match err {
            TrendCardError::SchemaValidation { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("expected SchemaValidation, got {other:?}"),
        }
        assert_eq!(binding.provider().requests().len(), 3);
    }

    #[tokio::test]
    async fn test_run_zero_retries_means_single_attempt() {
        let mut config = sample_config("gpt-4o");
        config.generator_retries = Some(0);
        let provider = ScriptedProvider::new().respond("bad").respond(card_json("A / B"));
        let binding = AgentBinding::new(&config, provider);

        assert!(binding.run("prompt").await.is_err());
        assert_eq!(binding.provider().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_is_not_retried() {
        let provider = ScriptedProvider::new()
            .fail("connection reset")
            .respond(card_json("A / B"));
        let binding = AgentBinding::new(&sample_config("gpt-4o"), provider);

        let err = binding.run("prompt").await.unwrap_err();

        assert!(matches!(err, TrendCardError::Provider(_)));
        assert_eq!(binding.provider().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_run_with_maximum_retry_budget() {
        let mut config = sample_config("gpt-4o");
        config.generator_retries = Some(u32::MAX);
        let provider = ScriptedProvider::new()
            .respond("{}")
            .respond(card_json("A / B"));
        let binding = AgentBinding::new(&config, provider);

        let card = binding.run("p").await.unwrap();

        assert_eq!(card.card_identifier, "A / B");
        assert_eq!(binding.retries(), u32::MAX);
        assert_eq!(binding.provider().requests().len(), 2);
    }
}
