//! sentflow CLI library
//!
//! Command implementations, configuration file handling, chunked input and
//! output formatting for the `sentflow` binary.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
