//! Running the extraction process
//!
//! [`ProcessRunner`] is the seam between the pipeline and the outside world.
//! [`CommandRunner`] is the production implementation: it spawns the engine
//! with an argument vector (the input path is one discrete argument, never
//! spliced into a shell string) and captures both output streams up to a
//! byte ceiling.

use crate::config::{TikaConfig, DEFAULT_MAX_BUFFER_BYTES};
use crate::error::ExtractionError;
use crate::types::{ProcessOutput, RunStatus};
use std::ffi::OsString;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Runs the extraction engine against one input file
pub trait ProcessRunner {
    /// Run the engine on `path` and capture its output.
    ///
    /// Process failures are reported through [`ProcessOutput::status`];
    /// an `Err` is reserved for conditions that abort before any output
    /// exists, such as a timeout.
    fn run(&self, path: &Path) -> impl Future<Output = Result<ProcessOutput, ExtractionError>> + Send;
}

/// Spawns an external command and captures its output
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: OsString,
    args: Vec<OsString>,
    max_buffer_bytes: usize,
    timeout: Option<Duration>,
}

impl CommandRunner {
    /// Runner for `program` with no leading arguments
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            max_buffer_bytes: DEFAULT_MAX_BUFFER_BYTES,
            timeout: None,
        }
    }

    /// Runner for `java [java_args] -jar <tika_path> <file>`
    pub fn tika(config: &TikaConfig) -> Self {
        let mut runner = Self::new(&config.java_path)
            .max_buffer_bytes(config.max_buffer_bytes)
            .timeout(config.timeout());
        for java_arg in &config.java_args {
            runner = runner.arg(java_arg);
        }
        runner.arg("-jar").arg(&config.tika_path)
    }

    /// Append an argument placed before the input path
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the per-stream capture ceiling
    pub fn max_buffer_bytes(mut self, max_buffer_bytes: usize) -> Self {
        self.max_buffer_bytes = max_buffer_bytes;
        self
    }

    /// Set or clear the process timeout
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl ProcessRunner for CommandRunner {
    async fn run(&self, path: &Path) -> Result<ProcessOutput, ExtractionError> {
        debug!(
            "Spawning {} with {} args on {}",
            self.program.to_string_lossy(),
            self.args.len(),
            path.display()
        );

        let mut child = match self.command(path).spawn() {
            Ok(child) => child,
            Err(e) => {
                return Ok(ProcessOutput::failed(
                    format!("Failed to spawn {}: {}", self.program.to_string_lossy(), e),
                    Vec::new(),
                ));
            }
        };

        let Some(limit) = self.timeout else {
            return Ok(capture(&mut child, self.max_buffer_bytes).await);
        };

        match timeout(limit, capture(&mut child, self.max_buffer_bytes)).await {
            Ok(output) => Ok(output),
            Err(_) => {
                warn!("Extraction of {} timed out after {:?}", path.display(), limit);
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill timed out process: {}", e);
                }
                Err(ExtractionError::Timeout(limit))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn name(self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

#[derive(Debug, Error)]
enum CaptureError {
    #[error("{} maxBuffer exceeded", .0.name())]
    Overflow(Stream),

    #[error("Failed to read {}: {}", .0.name(), .1)]
    Io(Stream, std::io::Error),
}

/// Read both streams to the end, then reap the child.
async fn capture(child: &mut Child, max_buffer_bytes: usize) -> ProcessOutput {
    let streams = tokio::try_join!(
        read_capped(child.stdout.take(), max_buffer_bytes, Stream::Stdout),
        read_capped(child.stderr.take(), max_buffer_bytes, Stream::Stderr),
    );

    let (stdout, stderr) = match streams {
        Ok(streams) => streams,
        Err(e) => {
            if let Err(kill_err) = child.kill().await {
                warn!("Failed to kill extraction process: {}", kill_err);
            }
            return match e {
                CaptureError::Overflow(Stream::Stdout) => ProcessOutput::buffer_exceeded(),
                other => ProcessOutput::failed(other.to_string(), Vec::new()),
            };
        }
    };

    let status = match child.wait().await {
        Ok(status) if status.success() => RunStatus::Success,
        Ok(status) => RunStatus::Failed(format!("Command failed with {}", status)),
        Err(e) => RunStatus::Failed(format!("Failed to wait for process: {}", e)),
    };

    ProcessOutput {
        status,
        stdout,
        stderr,
    }
}

/// Read at most `max` bytes; one byte more means the stream overflowed.
async fn read_capped<R>(reader: Option<R>, max: usize, stream: Stream) -> Result<Vec<u8>, CaptureError>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(Vec::new());
    };

    let mut buf = Vec::new();
    reader
        .take((max as u64).saturating_add(1))
        .read_to_end(&mut buf)
        .await
        .map_err(|e| CaptureError::Io(stream, e))?;

    if buf.len() > max {
        return Err(CaptureError::Overflow(stream));
    }
    Ok(buf)
}
