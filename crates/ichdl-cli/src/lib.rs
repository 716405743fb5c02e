//! ic-hdl-gen CLI library.
//!
//! Argument parsing, command implementations and output formatting for the
//! `ic-hdl-gen` binary.

use std::process::ExitCode;

pub mod cli;
pub mod commands;
pub mod error;
pub mod help;
pub mod output;

pub use error::CliError;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Success = 0,
    /// A batch finished with failures, or an unclassified error.
    Failure = 1,
    ConfigError = 2,
    IoError = 3,
    ValidationError = 5,
    NotFound = 6,
    RenderError = 8,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}
