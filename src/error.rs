//! Error types for trendcard.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::agent::prompt::TemplateError;
use crate::exit_codes;
use thiserror::Error;

/// Main error type for trendcard operations.
///
/// Each variant maps to a specific process exit code.
#[derive(Error, Debug)]
pub enum TrendCardError {
    /// The named configuration file was not found under any ancestor directory.
    #[error("config file '{file_name}' not found in any '{config_dir}' directory above '{searched_from}'")]
    ConfigurationNotFound {
        file_name: String,
        config_dir: String,
        searched_from: String,
    },

    /// The configuration file was found but is unreadable or invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The model output never conformed to the trend card schema.
    #[error("model output failed schema validation after {attempts} attempt(s): {message}")]
    SchemaValidation { attempts: u32, message: String },

    /// A prompt template could not be filled.
    #[error("template substitution failed: {0}")]
    TemplateSubstitution(String),

    /// Persistence was asked for an output format other than Markdown.
    #[error("unsupported output format '{0}' (only '.md' is supported)")]
    UnsupportedFormat(String),

    /// Reading or writing a file or directory failed.
    #[error("{0}")]
    Filesystem(String),

    /// The completion provider failed (transport, HTTP status, or payload shape).
    #[error("provider request failed: {0}")]
    Provider(String),

    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),
}

impl TrendCardError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TrendCardError::ConfigurationNotFound { .. }
            | TrendCardError::InvalidConfiguration(_)
            | TrendCardError::TemplateSubstitution(_)
            | TrendCardError::UnsupportedFormat(_)
            | TrendCardError::UserError(_) => exit_codes::USER_ERROR,
            TrendCardError::SchemaValidation { .. } => exit_codes::VALIDATION_FAILURE,
            TrendCardError::Provider(_) => exit_codes::PROVIDER_FAILURE,
            TrendCardError::Filesystem(_) => exit_codes::FILESYSTEM_FAILURE,
        }
    }
}

impl From<TemplateError> for TrendCardError {
    fn from(err: TemplateError) -> Self {
        TrendCardError::TemplateSubstitution(err.to_string())
    }
}

/// Result type alias for trendcard operations.
pub type Result<T> = std::result::Result<T, TrendCardError>;
