//! Environment variable handling.

use std::path::Path;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment configuration.
pub struct Environment {
    loaded: Vec<String>,
}

impl Environment {
    /// Load `.env` then `.env.local` from `dir`. Variables already present in
    /// the process environment are never overridden. Missing files are skipped.
    pub fn init(dir: impl AsRef<Path>) -> Result<Self, EnvError> {
        let dir = dir.as_ref();
        let mut loaded = Vec::new();

        for name in [".env", ".env.local"] {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            dotenvy::from_path(&path)?;
            loaded.push(name.to_string());
        }

        Ok(Self { loaded })
    }

    /// Names of the files that were loaded.
    pub fn loaded_files(&self) -> &[String] {
        &self.loaded
    }
}
