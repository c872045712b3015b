//! Core data types: documents, chunks, and scored retrieval hits.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A source document: raw text plus the path it was loaded from.
///
/// Immutable once loaded; created at process initialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Source identifier (file path).
    pub source: String,
    /// The full text content.
    pub text: String,
}

impl Document {
    /// Creates a document from a source identifier and its text.
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}

/// A contiguous piece of a [`Document`]: the atomic unit of retrieval.
///
/// Consecutive chunks overlap by a fixed number of characters, so information
/// spanning a boundary is never entirely lost to either chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Stable identifier, derived from the source, ordinal, and span.
    pub id: String,
    /// Ordinal of this chunk within its document (0-based).
    pub seq: u32,
    /// The chunk text.
    pub text: String,
}

/// A retrieved [`Chunk`] paired with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Cosine similarity against the query vector (higher is more relevant).
    pub score: f32,
    /// The retrieved chunk.
    pub chunk: Chunk,
}

/// Builds a stable chunk ID from the document source, chunk ordinal, and the
/// chunk's byte span within the document.
///
/// Rebuilding the index from the same document and configuration reproduces
/// identical IDs.
pub(crate) fn chunk_id(source: &str, seq: u32, start_byte: usize, end_byte: usize) -> String {
    let mut h = Sha256::new();
    h.update(source.as_bytes());
    h.update(seq.to_le_bytes());
    h.update(start_byte.to_le_bytes());
    h.update(end_byte.to_le_bytes());
    format!("{:x}", h.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_ids_are_stable_and_distinct() {
        let a = chunk_id("data/document.txt", 0, 0, 100);
        let b = chunk_id("data/document.txt", 0, 0, 100);
        let c = chunk_id("data/document.txt", 1, 80, 180);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
