//! CLI argument parsing and configuration resolution.

use crate::error::{CliError, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tika_hydrater::{Changes, TikaConfig};

/// Extract a document with Apache Tika and print the resulting changes as JSON.
#[derive(Debug, Parser)]
#[command(name = "tika-hydrate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Document to extract
    pub file: PathBuf,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Location of the Tika app jar
    #[arg(long, env = "TIKA_PATH")]
    pub tika_path: Option<PathBuf>,

    /// JVM executable
    #[arg(long, env = "TIKA_JAVA_PATH")]
    pub java_path: Option<PathBuf>,

    /// Kill the extraction after this many seconds
    #[arg(long, env = "TIKA_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Maximum bytes captured per output stream
    #[arg(long, env = "TIKA_MAX_BUFFER_BYTES")]
    pub max_buffer_bytes: Option<usize>,

    /// JSON file with the changes record to start from
    #[arg(long)]
    pub changes: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    /// Build the Tika configuration from the config file and flag overrides.
    pub fn resolve_config(&self) -> Result<TikaConfig> {
        let mut config = match (&self.config, &self.tika_path) {
            (Some(path), _) => TikaConfig::from_file(path)?,
            (None, Some(tika_path)) => TikaConfig::new(tika_path),
            (None, None) => {
                return Err(CliError::InvalidInput(
                    "either --config or --tika-path (TIKA_PATH) is required".to_string(),
                ));
            }
        };

        if self.config.is_some() {
            if let Some(tika_path) = &self.tika_path {
                config.tika_path = tika_path.clone();
            }
        }
        if let Some(java_path) = &self.java_path {
            config.java_path = java_path.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = Some(secs);
        }
        if let Some(bytes) = self.max_buffer_bytes {
            config.max_buffer_bytes = bytes;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load the starting changes record, or an empty one.
    pub fn load_changes(&self) -> Result<Changes> {
        match &self.changes {
            Some(path) => {
                let contents = fs::read_to_string(path)?;
                Ok(serde_json::from_str(&contents)?)
            }
            None => Ok(Changes::new()),
        }
    }
}
