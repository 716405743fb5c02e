//! File system utilities for ic-hdl-gen.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod path;

/// File system errors.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file too large: {} ({size} bytes, max {max})", path.display())]
    TooLarge { path: PathBuf, size: u64, max: usize },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Path the failed operation touched.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. }
            | Self::TooLarge { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, FsError>;

/// Read a file to string with size limit.
pub fn read_to_string(path: impl AsRef<Path>, max_size: usize) -> Result<String> {
    let path = path.as_ref();

    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FsError::NotFound {
            path: path.to_path_buf(),
            source: e,
        },
        _ => FsError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if metadata.len() as usize > max_size {
        return Err(FsError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: max_size,
        });
    }

    fs::read_to_string(path).map_err(|e| FsError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write bytes atomically (write to temp file, then rename).
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

    ensure_dir(parent)?;

    let mut temp_path = path.to_path_buf();
    if let Some(name) = path.file_name() {
        temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy()));
    } else {
        temp_path.push(".tmp");
    }

    if let Err(e) = write_temp(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(FsError::Write {
            path: temp_path,
            source: e,
        });
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FsError::Write {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

fn write_temp(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// Write a string atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// Create a directory and all parents if missing.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| FsError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}
