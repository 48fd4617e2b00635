//! Error types for the Hydrater

use std::time::Duration;
use thiserror::Error;

/// Errors that abort a hydration run
///
/// Every fatal condition of the pipeline surfaces through this one type so
/// the calling hydration pipeline has a single error shape to report.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The extraction process failed for a reason other than stdout overflow
    #[error("Extraction process failed: {}{}", .cause, stderr_suffix(.stderr))]
    ProcessFailed {
        /// Description of the underlying failure
        cause: String,
        /// Filtered stderr captured alongside the failure
        stderr: String,
    },

    /// Diagnostic output that suppressed all extractable content
    #[error("{0}")]
    Warning(String),

    /// The extraction process produced no output at all
    #[error("Tika did not return any data.")]
    NoData,

    /// The extraction process did not finish within the configured timeout
    #[error("Extraction timed out after {:?}", .0)]
    Timeout(Duration),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr.trim_end())
    }
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A warning filter pattern does not compile
    #[error("Invalid warning filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A setting is missing or out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
