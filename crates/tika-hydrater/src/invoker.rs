//! Run the engine and decide what its output means

use crate::error::ExtractionError;
use crate::filters::WarningFilters;
use crate::runner::ProcessRunner;
use crate::types::{Invocation, ProcessOutput, RunStatus};
use std::path::Path;
use tracing::{debug, warn};

/// Payload standing in for output that was too large to capture
pub const OVERSIZED_OUTPUT: &str = "<body></body>";

/// Runs the extraction engine and classifies the result
#[derive(Debug, Clone)]
pub struct Invoker<R> {
    runner: R,
    filters: WarningFilters,
}

impl<R: ProcessRunner> Invoker<R> {
    /// Create an invoker over `runner` using `filters` on stderr
    pub fn new(runner: R, filters: WarningFilters) -> Self {
        Self { runner, filters }
    }

    /// The underlying process runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the engine on `path`
    pub async fn invoke(&self, path: &Path) -> Result<Invocation, ExtractionError> {
        let output = self.runner.run(path).await?;
        debug!(
            "Extraction process finished: {} stdout bytes, {} stderr bytes",
            output.stdout.len(),
            output.stderr.len()
        );
        classify(output, &self.filters)
    }
}

/// Classify a finished run, first match wins:
///
/// 1. stdout overflow is a soft success with an empty body
/// 2. any other failure is fatal and carries the filtered stderr
/// 3. stderr with no stdout means the warning suppressed all output
/// 4. otherwise stderr is only a warning next to real output
pub fn classify(output: ProcessOutput, filters: &WarningFilters) -> Result<Invocation, ExtractionError> {
    let stderr = filters.strip(&String::from_utf8_lossy(&output.stderr));

    match output.status {
        RunStatus::BufferExceeded => {
            warn!("Extraction output exceeded the capture ceiling, sending an empty body");
            Ok(Invocation {
                warning: String::new(),
                raw_output: OVERSIZED_OUTPUT.to_string(),
            })
        }
        RunStatus::Failed(cause) => Err(ExtractionError::ProcessFailed { cause, stderr }),
        RunStatus::Success if !stderr.is_empty() && output.stdout.is_empty() => {
            Err(ExtractionError::Warning(stderr))
        }
        RunStatus::Success => {
            if !stderr.is_empty() {
                warn!("Extraction produced output with a warning: {}", stderr.trim_end());
            }
            Ok(Invocation {
                warning: stderr,
                raw_output: String::from_utf8_lossy(&output.stdout).into_owned(),
            })
        }
    }
}
