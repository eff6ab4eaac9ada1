//! Card persistence.
//!
//! A card is written as Markdown to `<dir>/<slug(card_identifier)>[_<suffix>].md`.
//! The directory is created on demand; an existing file of the same name is
//! replaced.

use crate::card::TrendCard;
use crate::error::{Result, TrendCardError};
use crate::fs::{DEFAULT_SUFFIX_SEPARATOR, atomic_write_file, card_file_name, ensure_dir};
use std::path::Path;
use tracing::debug;

/// The only supported output extension.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Where and how a card file is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistOptions<'a> {
    pub suffix: Option<&'a str>,
    pub separator: &'a str,
    pub extension: &'a str,
}

impl Default for PersistOptions<'_> {
    fn default() -> Self {
        Self {
            suffix: None,
            separator: DEFAULT_SUFFIX_SEPARATOR,
            extension: MARKDOWN_EXTENSION,
        }
    }
}

impl<'a> PersistOptions<'a> {
    pub fn with_suffix(suffix: Option<&'a str>) -> Self {
        Self {
            suffix,
            ..Self::default()
        }
    }
}

/// Persist a card as Markdown and return the file name (not the full path).
///
/// # Errors
///
/// - `TrendCardError::UnsupportedFormat` for any extension other than `.md`
/// - `TrendCardError::Filesystem` if the directory or file cannot be written
pub fn persist<P: AsRef<Path>>(
    card: &TrendCard,
    directory: P,
    options: &PersistOptions<'_>,
) -> Result<String> {
    if options.extension != MARKDOWN_EXTENSION {
        return Err(TrendCardError::UnsupportedFormat(
            options.extension.to_string(),
        ));
    }

    let directory = directory.as_ref();
    ensure_dir(directory)?;

    let file_name = card_file_name(
        &card.card_identifier,
        options.suffix,
        options.separator,
        options.extension,
    );
    let path = directory.join(&file_name);
    atomic_write_file(&path, &card.to_markdown())?;

    debug!(path = %path.display(), "persisted card");
    Ok(file_name)
}
