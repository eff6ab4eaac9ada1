//! Agent config struct definitions.

use super::types::{HarmBlockThreshold, HarmCategory, TEMPERATURE_RANGE};
use crate::error::{Result, TrendCardError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for a trend card agent, loaded from YAML.
///
/// ```yaml
/// model: gemini-2.5-flash
/// temperature: 0.7
/// max_tokens: 2048
/// thinking_budget: 1024
/// generator_retries: 3
/// system_prompt: |
///   You are a strategic foresight analyst...
/// generator_prompt: |
///   Industry: {industry_segment}
///   Topic: {topic}
///   Component: {component}
///   Keep every section under {word_limit} words.
/// ```
///
/// Unknown keys are kept in `extra` for forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model identifier, optionally provider-prefixed (`openai:gpt-4o`).
    pub model: String,

    /// System instruction installed once when the agent is bound.
    pub system_prompt: String,

    /// Prompt template used by the generator.
    #[serde(default, alias = "prompt_template", skip_serializing_if = "Option::is_none")]
    pub generator_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Gemini only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_budget: Option<u32>,

    /// Schema-validation retries after the first attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_retries: Option<u32>,

    /// Gemini only.
    #[serde(
        default,
        alias = "safety_settings_cateogry",
        skip_serializing_if = "Option::is_none"
    )]
    pub safety_settings_category: Option<HarmCategory>,

    /// Gemini only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_settings_threshold: Option<HarmBlockThreshold>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Caller-supplied override for the model and its temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfiguration {
    model: String,
    temperature: f64,
}

impl AgentConfiguration {
    /// Build an override, rejecting temperatures outside `[0.0, 2.0]`.
    pub fn new(model: impl Into<String>, temperature: f64) -> Result<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(TrendCardError::UserError(
                "agent configuration: model must not be empty".to_string(),
            ));
        }
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(TrendCardError::UserError(format!(
                "agent configuration: temperature {} is outside {:?}",
                temperature, TEMPERATURE_RANGE
            )));
        }
        Ok(Self { model, temperature })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}
