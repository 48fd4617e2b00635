//! Tika Hydrater CLI library.
//!
//! Argument parsing, configuration resolution and output rendering for the
//! `tika-hydrate` binary.

pub mod cli;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use error::{CliError, Result};
