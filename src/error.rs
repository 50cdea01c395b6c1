//! Error types for repository operations

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Repository errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Filesystem operation failed at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Manifest not found at {0}")]
    ManifestNotFound(PathBuf),

    #[error("Manifest could not be parsed: {0}")]
    ManifestCorrupt(#[source] serde_json::Error),

    #[error("Manifest could not be encoded: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Version index exhausted at v{0}")]
    VersionIndexExhausted(u32),
}

impl RepositoryError {
    /// Wrap an I/O failure together with the path it occurred at.
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

impl From<walkdir::Error> for RepositoryError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "directory walk aborted"));
        Self::Filesystem { path, source }
    }
}
