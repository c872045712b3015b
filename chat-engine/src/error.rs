//! Typed errors for a single chat turn.

use std::time::Duration;

use doc_index::IndexError;
use thiserror::Error;

/// Request-level error for one turn.
///
/// These are caught at the transport boundary and reported to the caller as a
/// structured failure; they never crash the process. An empty retrieval is
/// not an error (see `doc_index::retrieve`).
#[derive(Debug, Error)]
pub enum ChatError {
    /// Retrieval failed: embedding backend failure or dimensionality error.
    #[error(transparent)]
    Retrieval(#[from] IndexError),

    /// The generation backend failed or timed out.
    #[error(transparent)]
    Generation(#[from] GenerationFailure),
}

/// Generation failed, with the timeout reason kept distinct from other
/// backend errors so callers can report them differently.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    /// The call exceeded the configured timeout.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    /// The backend returned an error or was unreachable.
    #[error("generation backend error: {0}")]
    Backend(String),
}
