//! Markdown rendering and word counts for trend cards.

use super::TrendCard;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w']+\b").expect("Invalid word regex"));

/// Count words in a piece of text.
///
/// Apostrophes stay inside a token ("isn't" is one word); punctuation is
/// never counted.
pub fn count_words(text: &str) -> usize {
    WORD_REGEX.find_iter(text).count()
}

/// Per-field word counts in declared schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCounts(Vec<(&'static str, usize)>);

impl WordCounts {
    /// Count for a single field, if the name is a card field.
    pub fn get(&self, field: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.0.iter().copied()
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

impl fmt::Display for WordCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, count)) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<16} {}", name, count)?;
        }
        Ok(())
    }
}

impl TrendCard {
    /// Render the card as Markdown.
    ///
    /// Each field becomes `**<Title Case Name>:** <value>` followed by a blank
    /// line, in declared order; trailing whitespace of the block is trimmed.
    pub fn to_markdown(&self) -> String {
        let mut markdown = String::new();
        for (name, value) in self.fields() {
            markdown.push_str(&format!("**{}:** {}\n\n", title_case(name), value));
        }
        markdown.trim_end().to_string()
    }

    /// Word count of every field.
    pub fn word_counts(&self) -> WordCounts {
        WordCounts(
            self.fields()
                .iter()
                .map(|(name, value)| (*name, count_words(value)))
                .collect(),
        )
    }
}

/// `card_identifier` -> `Card Identifier`.
fn title_case(field_name: &str) -> String {
    field_name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
