//! Config loading, validation, override merging, and profile selection.

use super::model::{AgentConfig, AgentConfiguration};
use super::types::*;
use crate::error::{Result, TrendCardError};
use std::path::Path;
use tracing::debug;

impl AgentConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(AgentConfig)` - Successfully loaded and validated config
    /// * `Err(TrendCardError::Filesystem)` - The file could not be read
    /// * `Err(TrendCardError::InvalidConfiguration)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            TrendCardError::Filesystem(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "loaded agent config");
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AgentConfig = serde_yaml::from_str(yaml).map_err(|e| {
            TrendCardError::InvalidConfiguration(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `model` and `system_prompt` must not be empty
    /// - `temperature`, when set, must be within `[0.0, 2.0]`
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(TrendCardError::InvalidConfiguration(
                "config validation failed: model must not be empty".to_string(),
            ));
        }

        if self.system_prompt.trim().is_empty() {
            return Err(TrendCardError::InvalidConfiguration(
                "config validation failed: system_prompt must not be empty".to_string(),
            ));
        }

        if let Some(temperature) = self.temperature
            && !TEMPERATURE_RANGE.contains(&temperature)
        {
            return Err(TrendCardError::InvalidConfiguration(format!(
                "config validation failed: temperature {} is outside {:?}",
                temperature, TEMPERATURE_RANGE
            )));
        }

        Ok(())
    }

    /// Merge an optional override into this config.
    ///
    /// Only `model` and `temperature` are replaced; every other key keeps its
    /// base value.
    pub fn with_overrides(mut self, overrides: Option<&AgentConfiguration>) -> Self {
        if let Some(overrides) = overrides {
            debug!(
                model = overrides.model(),
                temperature = overrides.temperature(),
                "applying agent overrides"
            );
            self.model = overrides.model().to_string();
            self.temperature = Some(overrides.temperature());
        }
        self
    }

    /// The generator prompt template.
    pub fn generator_prompt(&self) -> Result<&str> {
        self.generator_prompt.as_deref().ok_or_else(|| {
            TrendCardError::InvalidConfiguration(
                "config has no 'generator_prompt' (or 'prompt_template') entry".to_string(),
            )
        })
    }

    pub fn effective_temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn effective_max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn effective_thinking_budget(&self) -> u32 {
        self.thinking_budget.unwrap_or(DEFAULT_THINKING_BUDGET)
    }

    pub fn effective_retries(&self) -> u32 {
        self.generator_retries.unwrap_or(DEFAULT_GENERATOR_RETRIES)
    }

    pub fn safety_policy(&self) -> SafetyPolicy {
        SafetyPolicy {
            category: self.safety_settings_category.unwrap_or_default(),
            threshold: self.safety_settings_threshold.unwrap_or_default(),
        }
    }

    /// Pick the sampling profile for this config's model.
    pub fn sampling_profile(&self) -> SamplingProfile {
        if is_gemini_model(&self.model) {
            SamplingProfile::Gemini {
                temperature: self.effective_temperature(),
                max_tokens: self.effective_max_tokens(),
                thinking_budget: self.effective_thinking_budget(),
                safety_policy: self.safety_policy(),
            }
        } else {
            SamplingProfile::Generic {
                temperature: self.effective_temperature(),
                max_tokens: self.effective_max_tokens(),
            }
        }
    }
}
