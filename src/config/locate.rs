//! Config file discovery.
//!
//! Walks from a start directory up through its ancestors, nearest first. The
//! first ancestor holding a directory named `config_dir` is searched
//! recursively for the file; if the file is not inside it, the walk goes on
//! to the next ancestor.

use super::model::AgentConfig;
use crate::error::{Result, TrendCardError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default name of the directory holding agent configs.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Default config file for the card generator.
pub const GENERATOR_CONFIG_FILE: &str = "trend_card_agent.yaml";

/// Default config file for the card editor.
pub const EDITOR_CONFIG_FILE: &str = "trend_card_editor.yaml";

/// Locate a config file starting from the current working directory.
pub fn locate_config(file_name: &str, config_dir: &str) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| {
        TrendCardError::Filesystem(format!("failed to get current working directory: {}", e))
    })?;

    locate_config_from(&cwd, file_name, config_dir)
}

/// Locate a config file starting from a specific directory.
pub fn locate_config_from(start: &Path, file_name: &str, config_dir: &str) -> Result<PathBuf> {
    for ancestor in start.ancestors() {
        let candidate = ancestor.join(config_dir);
        if !candidate.is_dir() {
            continue;
        }

        if let Some(found) = find_file(&candidate, file_name)? {
            debug!(path = %found.display(), "found config file");
            return Ok(found);
        }
    }

    Err(TrendCardError::ConfigurationNotFound {
        file_name: file_name.to_string(),
        config_dir: config_dir.to_string(),
        searched_from: start.display().to_string(),
    })
}

/// Locate and load a config file from the current working directory.
pub fn load_config(file_name: &str, config_dir: &str) -> Result<AgentConfig> {
    let path = locate_config(file_name, config_dir)?;
    AgentConfig::load(path)
}

/// Search `dir` recursively for `file_name`.
///
/// Direct children win over nested ones; subdirectories are visited in
/// sorted order so the result does not depend on directory listing order.
fn find_file(dir: &Path, file_name: &str) -> Result<Option<PathBuf>> {
    let direct = dir.join(file_name);
    if direct.is_file() {
        return Ok(Some(direct));
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        TrendCardError::Filesystem(format!(
            "failed to read config directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            TrendCardError::Filesystem(format!(
                "failed to read entry in '{}': {}",
                dir.display(),
                e
            ))
        })?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            subdirs.push(entry.path());
        }
    }
    subdirs.sort();

    for subdir in subdirs {
        if let Some(found) = find_file(&subdir, file_name)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}
