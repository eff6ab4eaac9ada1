//! Atomic file writes.
//!
//! Card files are written to a hidden temporary file in the target directory,
//! synced, and renamed over the destination, so a reader never sees a
//! half-written card. `std::fs::rename` replaces an existing destination on
//! both POSIX and Windows.
//!
//! On a crash a `.{filename}.tmp` file may remain next to the target.

use crate::error::{Result, TrendCardError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write a string to `path`, creating parent directories.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content.as_bytes())?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TrendCardError::Filesystem(format!("failed to replace '{}': {}", path.display(), e))
    })
}

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| {
        TrendCardError::Filesystem(format!(
            "failed to create directory '{}': {}",
            dir.display(),
            e
        ))
    })
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let file_name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            TrendCardError::Filesystem(format!("invalid file path '{}'", target.display()))
        })?;
    Ok(target.with_file_name(format!(".{}.tmp", file_name)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        TrendCardError::Filesystem(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            TrendCardError::Filesystem(format!(
                "failed to write temporary file '{}': {}",
                path.display(),
                e
            ))
        })
}
