//! Record and process types shared by the pipeline stages

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tag stored in `document_type` when textual content was found
pub const DOCUMENT_TYPE: &str = "document";

/// Caller-owned record of changes to apply to a document
///
/// The hydrater mutates this in place; fields it does not know about are
/// carried through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Changes {
    /// Document content
    #[serde(default)]
    pub data: ChangesData,

    /// Searchable metadata
    #[serde(default)]
    pub metadata: ChangesMetadata,

    /// Document classification tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
}

/// The `data` section of a [`Changes`] record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangesData {
    /// Raw HTML fragment found inside `<body>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Content type reported by the extraction engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Caller fields this crate does not manage
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `metadata` section of a [`Changes`] record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangesMetadata {
    /// Sanitized plain text derived from the HTML fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Caller fields this crate does not manage
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Changes {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }
}

/// Streams captured from a successful invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Filtered stderr that did not prevent output
    pub warning: String,

    /// Captured stdout
    pub raw_output: String,
}

/// How the extraction process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Exited successfully
    Success,
    /// stdout grew past the capture ceiling
    BufferExceeded,
    /// Any other failure (spawn error, non-zero exit, stderr overflow)
    Failed(String),
}

/// Raw result of running the extraction process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// How the process ended
    pub status: RunStatus,
    /// Captured stdout
    pub stdout: Vec<u8>,
    /// Captured stderr
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// A successful run with the given streams
    pub fn success(stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            status: RunStatus::Success,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// A failed run with the given cause and stderr
    pub fn failed(cause: impl Into<String>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            status: RunStatus::Failed(cause.into()),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// A run whose stdout overflowed the capture ceiling
    pub fn buffer_exceeded() -> Self {
        Self {
            status: RunStatus::BufferExceeded,
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }
}
