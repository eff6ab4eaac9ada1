//! Agent configuration for trendcard.
//!
//! This module defines the `AgentConfig` struct loaded from YAML, the
//! `AgentConfiguration` override, the sampling profile chosen per model, and
//! the upward directory search that locates config files.

mod locate;
mod model;
mod operations;
pub mod types;


// Re-export public API
pub use locate::{
    DEFAULT_CONFIG_DIR, EDITOR_CONFIG_FILE, GENERATOR_CONFIG_FILE, load_config, locate_config,
    locate_config_from,
};
pub use model::{AgentConfig, AgentConfiguration};
pub use types::{HarmBlockThreshold, HarmCategory, SafetyPolicy, SamplingProfile};
