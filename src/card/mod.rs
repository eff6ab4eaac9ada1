//! Trend card data model.
//!
//! A trend card is a fixed six-field document describing an emerging business
//! trend. The field order declared here is the order used everywhere the card
//! is rendered or measured.
//!
//! - **TrendCard**: the validated model output
//! - **TrendCardInput**: per-item inputs for the generator prompt
//! - **Render**: Markdown rendering and per-field word counts

mod render;


use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use render::{WordCounts, count_words};

/// Default per-section word limit.
pub const DEFAULT_WORD_LIMIT: u32 = 40;

/// Field names in declared schema order.
pub const FIELD_NAMES: [&str; 6] = [
    "card_identifier",
    "title",
    "description",
    "implications",
    "opportunities",
    "challenges",
];

/// Structured trend card produced by the model.
///
/// `challenges` is also accepted as `challenges_threats` when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrendCard {
    /// Identifier comprised of topic / component (e.g., 'Gen Z in the Workforce / Social')
    pub card_identifier: String,

    /// Short title that conveys the emerging trend, weak signal, or prospective event
    pub title: String,

    /// 1-3 sentence description of the finding
    pub description: String,

    /// 2-3 sentences describing the implication of the finding on businesses in the industry
    pub implications: String,

    /// 2-4 sentences highlighting opportunities the finding might present to businesses
    pub opportunities: String,

    /// 2-4 sentences describing potential challenges/threats posed by the finding
    #[serde(alias = "challenges_threats")]
    pub challenges: String,
}

impl TrendCard {
    /// Ordered (field name, value) pairs in declared schema order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            (FIELD_NAMES[0], self.card_identifier.as_str()),
            (FIELD_NAMES[1], self.title.as_str()),
            (FIELD_NAMES[2], self.description.as_str()),
            (FIELD_NAMES[3], self.implications.as_str()),
            (FIELD_NAMES[4], self.opportunities.as_str()),
            (FIELD_NAMES[5], self.challenges.as_str()),
        ]
    }

    /// Check that every field carries text.
    ///
    /// Returns the message naming the empty fields on failure. Length is not
    /// checked; the word limit is only an instruction to the model.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let empty: Vec<&str> = self
            .fields()
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if empty.is_empty() {
            Ok(())
        } else {
            Err(format!("fields must not be empty: {}", empty.join(", ")))
        }
    }

    /// JSON schema describing the card, as sent to the completion provider.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(TrendCard);
        serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
    }
}

/// Inputs for generating one trend card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendCardInput {
    /// The industry segment to analyze (e.g., 'Payment processing platforms').
    pub industry_segment: String,

    /// The topic to investigate (e.g., 'Gen Z in the Workforce').
    pub topic: String,

    /// STEEL component. When absent the model picks the most relevant one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// Per-section word limit given to the model.
    #[serde(default = "default_word_limit")]
    pub word_limit: u32,
}

fn default_word_limit() -> u32 {
    DEFAULT_WORD_LIMIT
}

impl TrendCardInput {
    pub fn new(industry_segment: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            industry_segment: industry_segment.into(),
            topic: topic.into(),
            component: None,
            word_limit: DEFAULT_WORD_LIMIT,
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_word_limit(mut self, word_limit: u32) -> Self {
        self.word_limit = word_limit;
        self
    }
}
