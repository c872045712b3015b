//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for chunking, indexing, and retrieval operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Malformed chunking parameters; detected before any splitting runs.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// I/O or filesystem errors while loading documents.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The embedding backend failed or timed out.
    #[error("embedding failure: {0}")]
    EmbeddingFailure(String),

    /// Mismatch in vector dimensionality across records.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },
}
