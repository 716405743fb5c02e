//! Metadata errors.

use ichdl_common_fs::FsError;
use thiserror::Error;

/// Errors raised while loading or querying metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("invalid metadata JSON in {source_name} at line {line}, column {column}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("invalid record '{part}': {message}")]
    InvalidRecord { part: String, message: String },

    #[error("duplicate part number '{part}'")]
    DuplicatePart { part: String },

    #[error("part number '{part}' not found in metadata")]
    PartNotFound {
        part: String,
        suggestions: Vec<String>,
    },
}

impl MetadataError {
    pub(crate) fn invalid(part: &str, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            part: part.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn parse(source_name: &str, err: &serde_json::Error) -> Self {
        Self::Parse {
            source_name: source_name.to_string(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    /// Close matches attached to a lookup failure.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::PartNotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
