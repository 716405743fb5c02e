//! Generator errors.

use ichdl_common_fs::FsError;
use ichdl_metadata::MetadataError;
use ichdl_templates::TemplateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Fs(#[from] FsError),

    /// The index pointed at a path the template set does not hold.
    #[error("template '{path}' is indexed but has no contents")]
    MissingSource { path: String },
}

impl GenerateError {
    /// Close matches for a failed part or template lookup.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::Metadata(e) => e.suggestions(),
            Self::Template(e) => e.suggestions(),
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
