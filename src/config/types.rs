//! Configuration types and defaults for trend card agents.
//!
//! This module defines the sampling profile, the safety policy enums, and
//! the default values applied when the YAML file leaves a key out.

use serde::{Deserialize, Serialize};

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.5;

/// Default maximum output tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Default thinking budget for Gemini models.
pub const DEFAULT_THINKING_BUDGET: u32 = 2048;

/// Default number of schema-validation retries.
pub const DEFAULT_GENERATOR_RETRIES: u32 = 3;

/// Allowed temperature range (inclusive).
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

/// Prefix that selects the Gemini sampling path.
pub const GEMINI_MODEL_PREFIX: &str = "gemini";

/// Content-safety category understood by the Gemini API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    #[default]
    HarmCategoryDangerousContent,
    HarmCategoryCivicIntegrity,
}

/// Block threshold for a content-safety category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    #[default]
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
    Off,
}

/// A single (category, threshold) safety setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SafetyPolicy {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Sampling settings for a model, chosen once when the config is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingProfile {
    /// Any provider reachable through the generic settings path.
    Generic { temperature: f64, max_tokens: u32 },
    /// Gemini models, which take a thinking budget and safety settings.
    Gemini {
        temperature: f64,
        max_tokens: u32,
        thinking_budget: u32,
        safety_policy: SafetyPolicy,
    },
}

impl SamplingProfile {
    pub fn temperature(&self) -> f64 {
        match self {
            SamplingProfile::Generic { temperature, .. }
            | SamplingProfile::Gemini { temperature, .. } => *temperature,
        }
    }

    pub fn max_tokens(&self) -> u32 {
        match self {
            SamplingProfile::Generic { max_tokens, .. }
            | SamplingProfile::Gemini { max_tokens, .. } => *max_tokens,
        }
    }

    pub fn is_gemini(&self) -> bool {
        matches!(self, SamplingProfile::Gemini { .. })
    }
}

/// Strip an optional `provider:` prefix (e.g. `openai:gpt-4o`) from a model id.
pub fn bare_model_name(model: &str) -> &str {
    model.split_once(':').map_or(model, |(_, name)| name)
}

/// Whether a model identifier selects the Gemini path.
pub fn is_gemini_model(model: &str) -> bool {
    bare_model_name(model).starts_with(GEMINI_MODEL_PREFIX)
}
