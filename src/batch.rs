//! Batch runner.
//!
//! Both batches walk their items strictly in order, one model call at a time,
//! and persist each card before starting the next item. The first failure
//! (read, model, or write) ends the batch: items already persisted stay on
//! disk, later items are never attempted.

use crate::agent::CompletionProvider;
use crate::card::{TrendCardInput, WordCounts};
use crate::editor::CardEditor;
use crate::error::{Result, TrendCardError};
use crate::fs::read_file;
use crate::generator::CardGenerator;
use crate::persist::{PersistOptions, persist};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Ordered topic -> component pairs. A `None` component leaves the choice
/// to the model.
pub type TopicMap = Vec<(String, Option<String>)>;

/// Outcome of one successfully processed batch item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// 1-based position in the batch.
    pub sequence: usize,
    pub card_identifier: String,
    /// Written file name, relative to the target directory.
    pub file_name: String,
    pub word_counts: WordCounts,
    /// Input file, for edit batches.
    pub source: Option<PathBuf>,
}

/// Generate and persist one card per topic, in mapping order.
///
/// `on_item` is called after each card has been written.
pub async fn generate_batch<P, F>(
    generator: &CardGenerator<P>,
    industry_segment: &str,
    topics: &[(String, Option<String>)],
    word_limit: u32,
    target_dir: &Path,
    mut on_item: F,
) -> Result<Vec<BatchItem>>
where
    P: CompletionProvider,
    F: FnMut(&BatchItem),
{
    info!(
        count = topics.len(),
        dir = %target_dir.display(),
        "generating trend cards"
    );

    let mut items = Vec::with_capacity(topics.len());
    for (index, (topic, component)) in topics.iter().enumerate() {
        let mut inputs = TrendCardInput::new(industry_segment, topic.as_str()).with_word_limit(word_limit);
        inputs.component = component.clone();

        let card = generator.generate(&inputs).await?;
        let file_name = persist(&card, target_dir, &PersistOptions::default())?;

        let item = BatchItem {
            sequence: index + 1,
            card_identifier: card.card_identifier.clone(),
            file_name,
            word_counts: card.word_counts(),
            source: None,
        };
        info!(sequence = item.sequence, card = %item.card_identifier, file = %item.file_name, "card generated");
        on_item(&item);
        items.push(item);
    }

    Ok(items)
}

/// Edit each file in list order and persist the result with `suffix`
/// appended to the card's derived file name.
///
/// `on_item` is called after each card has been written.
pub async fn edit_batch<P, F>(
    editor: &CardEditor<P>,
    files: &[PathBuf],
    target_dir: &Path,
    suffix: &str,
    mut on_item: F,
) -> Result<Vec<BatchItem>>
where
    P: CompletionProvider,
    F: FnMut(&BatchItem),
{
    info!(
        count = files.len(),
        dir = %target_dir.display(),
        "editing trend cards"
    );

    let options = PersistOptions::with_suffix(Some(suffix));
    let mut items = Vec::with_capacity(files.len());
    for (index, file) in files.iter().enumerate() {
        let text = read_file(file)?;
        let card = editor.edit(&text).await?;
        let file_name = persist(&card, target_dir, &options)?;

        let item = BatchItem {
            sequence: index + 1,
            card_identifier: card.card_identifier.clone(),
            file_name,
            word_counts: card.word_counts(),
            source: Some(file.clone()),
        };
        info!(sequence = item.sequence, source = %file.display(), file = %item.file_name, "card edited");
        on_item(&item);
        items.push(item);
    }

    Ok(items)
}

/// Parse an ordered YAML mapping of topic -> component.
///
/// ```yaml
/// Gen Z in the Workforce: Social
/// Embedded Finance: Economic
/// Quantum-Safe Payments: ~      # let the model pick
/// ```
pub fn parse_topic_map(yaml: &str) -> Result<TopicMap> {
    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| TrendCardError::UserError(format!("failed to parse topics YAML: {}", e)))?;

    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Vec::new()),
        _ => {
            return Err(TrendCardError::UserError(
                "topics file must be a mapping of topic to component".to_string(),
            ));
        }
    };

    mapping
        .into_iter()
        .map(|(key, value)| {
            let topic = scalar_text(&key).ok_or_else(|| {
                TrendCardError::UserError(format!("topic keys must be text, found {:?}", key))
            })?;
            let component = match value {
                Value::Null => None,
                other => Some(scalar_text(&other).ok_or_else(|| {
                    TrendCardError::UserError(format!(
                        "component for '{}' must be text, found {:?}",
                        topic, other
                    ))
                })?),
            };
            Ok((topic, component))
        })
        .collect()
}

/// Load a topics file.
pub fn load_topic_map<P: AsRef<Path>>(path: P) -> Result<TopicMap> {
    parse_topic_map(&read_file(path)?)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
