//! Exit code constants for the trendcard CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing or invalid configuration, template errors)
//! - 2: Schema validation failure (model output never conformed)
//! - 3: Provider failure (transport or HTTP error)
//! - 4: Filesystem failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Model output failed schema validation after all retries.
pub const VALIDATION_FAILURE: i32 = 2;

/// Completion provider failure: transport error or non-success response.
pub const PROVIDER_FAILURE: i32 = 3;

/// Filesystem failure: missing path, unreadable input, failed write.
pub const FILESYSTEM_FAILURE: i32 = 4;
