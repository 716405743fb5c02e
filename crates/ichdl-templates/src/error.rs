//! Template errors.

use crate::language::{Language, TemplateKind};
use ichdl_common_fs::FsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering, resolving or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template directory not found: {}", path.display())]
    DirNotFound { path: PathBuf },

    #[error("failed to scan {}: {message}", path.display())]
    Scan { path: PathBuf, message: String },

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("no {language} {kind} template found for '{name}'")]
    NotFound {
        name: String,
        language: Language,
        kind: TemplateKind,
        /// Relative paths tried, in order.
        searched: Vec<String>,
        suggestions: Vec<String>,
    },

    #[error("syntax error in template {template}: {message}")]
    Syntax { template: String, message: String },

    #[error("failed to render template {template}: {message}")]
    Render { template: String, message: String },
}

impl TemplateError {
    /// Close matches attached to a lookup failure.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Paths that resolution tried.
    pub fn searched(&self) -> &[String] {
        match self {
            Self::NotFound { searched, .. } => searched,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
