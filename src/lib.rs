//! Trendcard: structured trend card generation and editing with LLM agents.
//!
//! A trend card is a six-section analysis (identifier, title, description,
//! implications, opportunities, challenges) of one topic within an industry
//! segment. The library resolves agent configuration from YAML, asks a
//! completion provider for schema-conformant output, and persists each card
//! as Markdown.

pub mod agent;
pub mod batch;
pub mod card;
pub mod config;
pub mod editor;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod generator;
pub mod persist;

#[cfg(test)]
mod test_support;

pub use batch::{BatchItem, TopicMap, edit_batch, generate_batch, load_topic_map, parse_topic_map};
pub use card::{TrendCard, TrendCardInput, WordCounts};
pub use editor::CardEditor;
pub use error::{Result, TrendCardError};
pub use generator::CardGenerator;
pub use persist::{PersistOptions, persist};
