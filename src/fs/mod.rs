//! Filesystem utilities for trendcard.
//!
//! Atomic writes for card output, safe names for cards and models, and the
//! read/list helpers used by the edit batch.

pub mod atomic;
mod files;
mod naming;

pub use atomic::{atomic_write_file, ensure_dir};
pub use files::{get_file_list, read_file};
pub use naming::{
    DEFAULT_SUFFIX_SEPARATOR, append_to_filename, append_to_filename_with, card_file_name,
    directory_safe_model_name, slug,
};
