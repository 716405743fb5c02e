//! CLI error handling and formatting.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use ichdl_common_config::ConfigError;
use ichdl_common_fs::FsError;
use ichdl_generator::GenerateError;
use ichdl_metadata::MetadataError;
use ichdl_templates::TemplateError;
use thiserror::Error;

use crate::help::{did_you_mean, template_hint, LIST_HINT};
use crate::Exit;

pub mod formatter;

pub use formatter::ErrorFormatter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// CLI error type with rich context
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxError>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: Option<BoxError>,
        path: Option<PathBuf>,
    },

    /// Bad metadata or template content.
    #[error("{message}")]
    Validation { message: String, hint: Option<String> },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Render { message: String, template: String },

    /// Some parts of a batch failed; the rest were written.
    #[error("{failed} of {total} files failed")]
    Batch { failed: usize, total: usize },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E003",
            Self::NotFound { .. } => "E004",
            Self::Render { .. } => "E005",
            Self::Batch { .. } => "E006",
            Self::Other(_) => "E999",
        }
    }

    pub fn exit(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Validation { .. } => Exit::ValidationError,
            Self::NotFound { .. } => Exit::NotFound,
            Self::Render { .. } => Exit::RenderError,
            Self::Batch { .. } | Self::Other(_) => Exit::Failure,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        self.exit().into()
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. }
            | Self::Validation { hint, .. }
            | Self::NotFound { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Get suggestions for this error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a config error with hint
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: Some(hint.into()),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
            path: None,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a validation error with hint
    pub fn validation_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            hint: did_you_mean(&suggestions),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    /// Summary error for a batch with failures.
    pub fn batch(failed: usize, total: usize) -> Self {
        Self::Batch { failed, total }
    }
}

// Conversion implementations
impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(Box::new(err)),
            path: None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::Error::new(err).context("failed to serialize JSON output"))
    }
}

impl From<FsError> for CliError {
    fn from(err: FsError) -> Self {
        let path = err.path().to_path_buf();
        let message = err.to_string();
        let source: Option<BoxError> = match err {
            FsError::NotFound { source, .. }
            | FsError::Read { source, .. }
            | FsError::Write { source, .. } => Some(Box::new(source)),
            FsError::TooLarge { .. } => None,
        };
        Self::Io {
            message,
            source,
            path: Some(path),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Fs(e) => e.into(),
            other => Self::Config {
                message: format!("configuration error: {other}"),
                source: None,
                hint: Some("check .ichdl/config.yaml or the file passed to --config".to_string()),
            },
        }
    }
}

impl From<MetadataError> for CliError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::Fs(e) => e.into(),
            MetadataError::PartNotFound { part, suggestions } => {
                let mut e = Self::not_found_with_suggestions("part", part, suggestions);
                if let Self::NotFound { hint, .. } = &mut e {
                    hint.get_or_insert_with(|| LIST_HINT.to_string());
                }
                e
            }
            other => Self::validation_with_hint(
                other.to_string(),
                "fix the metadata file or pass a different one with --metadata",
            ),
        }
    }
}

impl From<TemplateError> for CliError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::Fs(e) => e.into(),
            TemplateError::DirNotFound { ref path } => Self::Config {
                message: err.to_string(),
                hint: Some(format!(
                    "{} must contain hdl_templates/ and testbench_templates/",
                    path.display()
                )),
                source: None,
            },
            TemplateError::Scan { ref path, .. } => Self::Io {
                message: err.to_string(),
                path: Some(path.clone()),
                source: None,
            },
            TemplateError::NotFound {
                ref name,
                language,
                kind,
                ..
            } => Self::NotFound {
                message: err.to_string(),
                resource_type: format!("{language} {kind} template"),
                resource_name: name.clone(),
                hint: Some(template_hint(kind, language)),
                suggestions: err.suggestions().to_vec(),
            },
            TemplateError::Syntax { ref template, .. }
            | TemplateError::Render { ref template, .. } => Self::Render {
                template: template.clone(),
                message: err.to_string(),
            },
        }
    }
}

impl From<GenerateError> for CliError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Metadata(e) => e.into(),
            GenerateError::Template(e) => e.into(),
            GenerateError::Fs(e) => e.into(),
            GenerateError::MissingSource { ref path } => Self::Render {
                template: path.clone(),
                message: err.to_string(),
            },
        }
    }
}
