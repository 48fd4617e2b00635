//! Tika Hydrater
//!
//! Extracts text, HTML body content and content-type metadata from a
//! document by running Apache Tika as a subprocess, then merges the
//! sanitized result into a caller-owned [`Changes`] record.
//!
//! # Architecture
//!
//! ```text
//! path → Invoker (java -jar tika-app.jar <path>) → Interpreter → Changes
//! ```
//!
//! The Invoker runs the engine and classifies the run (success, benign
//! warning, fatal error, oversized output). The Interpreter pulls the
//! `<body>` fragment and the `Content-Type` meta tag out of the captured
//! output. Any failure aborts the run with an [`ExtractionError`].
//!
//! # Example Usage
//!
//! ```no_run
//! use tika_hydrater::{Changes, TikaConfig, TikaHydrater};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TikaConfig::new("/opt/tika/tika-app.jar");
//! let hydrater = TikaHydrater::from_config(&config)?;
//!
//! let mut changes = Changes::new();
//! hydrater.hydrate(Path::new("report.pdf"), &mut changes).await?;
//!
//! println!("Content type: {:?}", changes.data.content_type);
//! println!("Text: {:?}", changes.metadata.text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod filters;
mod hydrater;
mod interpreter;
mod invoker;
mod runner;
mod types;


pub use config::{TikaConfig, DEFAULT_MAX_BUFFER_BYTES};
pub use error::{ConfigError, ExtractionError};
pub use filters::WarningFilters;
pub use hydrater::TikaHydrater;
pub use interpreter::{html_to_text, interpret};
pub use invoker::{classify, Invoker, OVERSIZED_OUTPUT};
pub use runner::{CommandRunner, ProcessRunner};
pub use types::{
    Changes, ChangesData, ChangesMetadata, Invocation, ProcessOutput, RunStatus, DOCUMENT_TYPE,
};
