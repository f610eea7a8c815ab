//! Error type shared by the chunking pipeline and the corpus loader.

use std::io;
use std::path::PathBuf;

/// Errors surfaced while chunking a document or walking a corpus.
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    /// The input file or directory does not exist.
    #[error("input path not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The input exists but could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The requested chunking strategy name is unknown.
    #[error("unsupported chunking strategy: {0}")]
    UnsupportedStrategy(String),
    /// Chunking parameters cannot produce a terminating window walk.
    #[error("invalid chunking configuration: {0}")]
    InvalidConfig(String),
}

impl ChunkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
