//! Reading card inputs and listing batch files.

use crate::error::{Result, TrendCardError};
use globset::{Glob, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a UTF-8 text file.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TrendCardError::Filesystem(format!(
            "file does not exist: {}",
            path.display()
        )));
    }

    fs::read_to_string(path).map_err(|e| {
        TrendCardError::Filesystem(format!("failed to read '{}': {}", path.display(), e))
    })
}

/// All files under `dir` (recursively) with the given extension, sorted.
///
/// The extension may be given with or without its leading dot.
///
/// # Errors
///
/// - `dir` does not exist
/// - `dir` is not a directory
pub fn get_file_list<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(TrendCardError::Filesystem(format!(
            "path does not exist: {}",
            dir.display()
        )));
    }
    if !dir.is_dir() {
        return Err(TrendCardError::Filesystem(format!(
            "path is not a directory: {}",
            dir.display()
        )));
    }

    let extension = extension.trim_start_matches('.');
    let pattern = format!("*.{}", globset::escape(extension));
    let matcher = Glob::new(&pattern)
        .map_err(|e| TrendCardError::UserError(format!("invalid extension '{}': {}", extension, e)))?
        .compile_matcher();

    let mut files = Vec::new();
    collect_files(dir, &matcher, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(dir: &Path, matcher: &GlobMatcher, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        TrendCardError::Filesystem(format!("failed to read directory '{}': {}", dir.display(), e))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            TrendCardError::Filesystem(format!("failed to read entry in '{}': {}", dir.display(), e))
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| {
            TrendCardError::Filesystem(format!("failed to stat '{}': {}", path.display(), e))
        })?;

        if file_type.is_dir() {
            collect_files(&path, matcher, files)?;
        } else if matcher.is_match(entry.file_name()) {
            files.push(path);
        }
    }

    Ok(())
}
