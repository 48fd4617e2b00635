//! Configuration for the Hydrater
//!
//! Locates the Tika app jar and the JVM that runs it, and bounds the
//! captured process output.

use crate::error::ConfigError;
use crate::filters::WarningFilters;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default ceiling for each captured output stream: 8 MiB
pub const DEFAULT_MAX_BUFFER_BYTES: usize = 8 * 1024 * 1024;

/// Configuration for the Tika extraction process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TikaConfig {
    /// Location of the Tika app jar
    pub tika_path: PathBuf,

    /// JVM executable used to run the jar
    #[serde(default = "default_java_path")]
    pub java_path: PathBuf,

    /// JVM options placed before `-jar`
    #[serde(default)]
    pub java_args: Vec<String>,

    /// Maximum bytes captured per output stream
    #[serde(default = "default_max_buffer_bytes")]
    pub max_buffer_bytes: usize,

    /// Kill the process after this many seconds (unset: wait indefinitely)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Additional stderr patterns to treat as benign noise
    #[serde(default)]
    pub extra_warning_filters: Vec<String>,
}

fn default_java_path() -> PathBuf {
    PathBuf::from("java")
}

fn default_max_buffer_bytes() -> usize {
    DEFAULT_MAX_BUFFER_BYTES
}

impl TikaConfig {
    /// Create a configuration for the given jar with default settings
    pub fn new(tika_path: impl Into<PathBuf>) -> Self {
        Self {
            tika_path: tika_path.into(),
            java_path: default_java_path(),
            java_args: Vec::new(),
            max_buffer_bytes: DEFAULT_MAX_BUFFER_BYTES,
            timeout_secs: None,
            extra_warning_filters: Vec::new(),
        }
    }

    /// Get the process timeout as a Duration, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tika_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("tika_path must not be empty".to_string()));
        }
        if self.java_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("java_path must not be empty".to_string()));
        }
        if self.max_buffer_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_buffer_bytes must be greater than 0".to_string(),
            ));
        }
        if self.max_buffer_bytes > isize::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "max_buffer_bytes must be at most {}",
                isize::MAX
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.warning_filters()?;
        Ok(())
    }

    /// Compile the built-in warning filters plus any configured extras
    pub fn warning_filters(&self) -> Result<WarningFilters, ConfigError> {
        WarningFilters::with_patterns(&self.extra_warning_filters)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: TikaConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Load configuration from the environment
    ///
    /// `TIKA_PATH` is required; `TIKA_JAVA_PATH`, `TIKA_TIMEOUT_SECS` and
    /// `TIKA_MAX_BUFFER_BYTES` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let tika_path = env::var_os("TIKA_PATH")
            .ok_or_else(|| ConfigError::Invalid("TIKA_PATH is not set".to_string()))?;

        let mut config = Self::new(tika_path);
        if let Some(java_path) = env::var_os("TIKA_JAVA_PATH") {
            config.java_path = PathBuf::from(java_path);
        }
        if let Ok(secs) = env::var("TIKA_TIMEOUT_SECS") {
            config.timeout_secs = Some(parse_env_number("TIKA_TIMEOUT_SECS", &secs)?);
        }
        if let Ok(bytes) = env::var("TIKA_MAX_BUFFER_BYTES") {
            config.max_buffer_bytes = parse_env_number("TIKA_MAX_BUFFER_BYTES", &bytes)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_env_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} must be a number, got '{}'", name, value)))
}
