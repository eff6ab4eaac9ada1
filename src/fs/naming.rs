//! Filesystem-safe names for cards, models, and derived files.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static NON_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid non-word regex"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Default separator between a file stem and an appended suffix.
pub const DEFAULT_SUFFIX_SEPARATOR: &str = "_";

/// Lower-case `text`, turn punctuation into spaces, and collapse every
/// whitespace run into a single underscore.
///
/// `"Gen Z in the Workforce / Social"` becomes `"gen_z_in_the_workforce_social"`.
/// Leading and trailing runs are kept: `"AI / Legal?"` becomes `"ai_legal_"`.
/// Applying `slug` to its own output returns it unchanged.
pub fn slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced = NON_WORD_REGEX.replace_all(&lowered, " ");
    WHITESPACE_REGEX.replace_all(&spaced, "_").into_owned()
}

/// File name for a card: `<slug(identifier)>[<separator><suffix>]<extension>`.
pub fn card_file_name(
    card_identifier: &str,
    suffix: Option<&str>,
    separator: &str,
    extension: &str,
) -> String {
    let stem = slug(card_identifier);
    match suffix {
        Some(suffix) => append_to_filename_with(&format!("{stem}{extension}"), suffix, separator),
        None => format!("{stem}{extension}"),
    }
}

/// Insert `_<suffix>` between a file's stem and its extension.
///
/// `append_to_filename("report.md", "edited")` returns `"report_edited.md"`.
pub fn append_to_filename(file_path: &str, suffix: &str) -> String {
    append_to_filename_with(file_path, suffix, DEFAULT_SUFFIX_SEPARATOR)
}

/// Insert `<separator><suffix>` between a file's stem and its extension,
/// keeping any parent directories.
///
/// `append_to_filename_with("/a/b/document.pdf", "v2", "-")` returns
/// `"/a/b/document-v2.pdf"`.
pub fn append_to_filename_with(file_path: &str, suffix: &str, separator: &str) -> String {
    let path = Path::new(file_path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let file_name = format!("{stem}{separator}{suffix}{extension}");

    match path.parent() {
        Some(parent) => parent.join(file_name).to_string_lossy().into_owned(),
        None => file_name,
    }
}

/// Model identifier usable as a directory name: `.`, `:` and `-` become `_`.
///
/// `"gemini-2.5-flash"` becomes `"gemini_2_5_flash"`.
pub fn directory_safe_model_name(model: &str) -> String {
    model
        .chars()
        .map(|c| match c {
            '.' | ':' | '-' => '_',
            other => other,
        })
        .collect()
}
