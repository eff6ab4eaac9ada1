//! Agent subsystem for trend card generation.
//!
//! - **Binding**: a model, system instruction, and output schema bound
//!   together, with bounded retries on schema-validation failure
//! - **Provider**: the structured completion interface the binding calls
//! - **Http**: the Gemini / OpenAI-compatible provider used by the CLI
//! - **Prompt**: placeholder substitution for prompt templates

mod binding;
mod http;
pub mod prompt;
mod provider;

// Re-export public API
pub use binding::{AgentBinding, parse_card};
pub use http::HttpProvider;
pub use provider::{CompletionProvider, CompletionRequest, Role, Turn};
