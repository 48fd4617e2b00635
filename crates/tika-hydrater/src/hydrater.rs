//! Core Hydrater implementation

use crate::config::TikaConfig;
use crate::error::{ConfigError, ExtractionError};
use crate::filters::WarningFilters;
use crate::interpreter::interpret;
use crate::invoker::Invoker;
use crate::runner::{CommandRunner, ProcessRunner};
use crate::types::Changes;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Extracts a document with Tika and merges the result into a changes record
#[derive(Debug, Clone)]
pub struct TikaHydrater<R> {
    invoker: Invoker<R>,
}

impl TikaHydrater<CommandRunner> {
    /// Create a Hydrater that runs the Tika app jar described by `config`
    pub fn from_config(config: &TikaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let filters = config.warning_filters()?;
        Ok(Self::new(CommandRunner::tika(config), filters))
    }
}

impl<R: ProcessRunner> TikaHydrater<R> {
    /// Create a Hydrater over an arbitrary process runner
    pub fn new(runner: R, filters: WarningFilters) -> Self {
        Self {
            invoker: Invoker::new(runner, filters),
        }
    }

    /// The process runner this Hydrater spawns through
    pub fn runner(&self) -> &R {
        self.invoker.runner()
    }

    /// Extract `path` and merge the result into `changes`
    ///
    /// Runs the engine, then interprets its output, stopping at the first
    /// error. `changes` stays with the caller either way and may have been
    /// partially updated when an error is returned.
    pub async fn hydrate(&self, path: &Path, changes: &mut Changes) -> Result<(), ExtractionError> {
        let start = Instant::now();
        info!("Starting extraction of {}", path.display());

        let result = match self.invoker.invoke(path).await {
            Ok(invocation) => interpret(&invocation.warning, &invocation.raw_output, changes),
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => info!(
                "Extraction of {} complete in {} ms: text={}, content_type={}",
                path.display(),
                start.elapsed().as_millis(),
                changes.metadata.text.is_some(),
                changes.data.content_type.as_deref().unwrap_or("unknown")
            ),
            Err(e) => warn!("Extraction of {} failed: {}", path.display(), e),
        }

        result
    }
}
