//! Scaffolding errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting input or materializing a manifest
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Cannot read input: {0}")]
    Input(String),

    #[error("Template not found: {0}")]
    MissingTemplate(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Template is not valid UTF-8: {0}")]
    NotUtf8(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}

impl ScaffoldError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Path of the file or directory that could not be written, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Write { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
