//! In-memory vector index using cosine similarity.
//!
//! Entries are kept in insertion order behind a `tokio::sync::RwLock`, so
//! queries are concurrent and ties between equal scores resolve to the
//! original chunk order. A separate readiness flag gates retrieval while the
//! first build is still running: readers observe "not ready" instead of
//! blocking on partial state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tracing::warn;

use crate::error::IndexError;
use crate::record::{Chunk, ScoredChunk};

/// An in-memory vector index with cosine-similarity search.
///
/// Built once per document set at startup and read-only during serving. Every
/// indexed chunk has exactly one vector; all vectors share one dimension.
#[derive(Debug, Default)]
pub struct VectorIndex {
    state: RwLock<IndexState>,
    ready: AtomicBool,
}

#[derive(Debug, Default)]
struct IndexState {
    entries: Vec<IndexEntry>,
    by_id: HashMap<String, usize>,
    dim: Option<usize>,
}

#[derive(Debug)]
struct IndexEntry {
    chunk: Chunk,
    vector: Vec<f32>,
}

impl VectorIndex {
    /// Creates a new, empty, not-ready index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the vector for a chunk identity.
    ///
    /// The first inserted vector fixes the index dimension.
    ///
    /// # Errors
    /// Returns [`IndexError::VectorSizeMismatch`] if the vector's dimension
    /// differs from the established one.
    pub async fn upsert(&self, chunk: Chunk, vector: Vec<f32>) -> Result<(), IndexError> {
        let mut state = self.state.write().await;
        match state.dim {
            Some(want) if vector.len() != want => {
                return Err(IndexError::VectorSizeMismatch {
                    got: vector.len(),
                    want,
                });
            }
            Some(_) => {}
            None => state.dim = Some(vector.len()),
        }

        match state.by_id.get(&chunk.id).copied() {
            Some(pos) => state.entries[pos] = IndexEntry { chunk, vector },
            None => {
                let pos = state.entries.len();
                state.by_id.insert(chunk.id.clone(), pos);
                state.entries.push(IndexEntry { chunk, vector });
            }
        }
        Ok(())
    }

    /// Returns the `top_k` most similar chunks to the given vector,
    /// descending by score; ties keep the original chunk order.
    ///
    /// Fewer than `top_k` entries return everything; an empty index returns
    /// an empty result, never an error.
    pub async fn query(&self, vector: &[f32], top_k: usize) -> Vec<ScoredChunk> {
        let state = self.state.read().await;
        if let Some(want) = state.dim {
            if vector.len() != want {
                warn!(
                    got = vector.len(),
                    want, "query vector dimension mismatch; returning no hits"
                );
                return Vec::new();
            }
        }

        let mut scored: Vec<ScoredChunk> = state
            .entries
            .iter()
            .map(|e| ScoredChunk {
                score: cosine_similarity(&e.vector, vector),
                chunk: e.chunk.clone(),
            })
            .collect();

        // Stable sort: equal scores stay in insertion (chunk) order.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        scored
    }

    /// Whether at least one successful build has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Marks the index as queryable. Called by ingestion after a build.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Number of indexed chunks.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// Whether the index holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, seq: u32) -> Chunk {
        Chunk {
            id: id.to_string(),
            seq,
            text: format!("chunk {id}"),
        }
    }

    #[tokio::test]
    async fn query_returns_k_results_descending() {
        let index = VectorIndex::new();
        index.upsert(chunk("a", 0), vec![1.0, 0.0]).await.unwrap();
        index.upsert(chunk("b", 1), vec![0.0, 1.0]).await.unwrap();
        index.upsert(chunk("c", 2), vec![0.7, 0.7]).await.unwrap();

        let hits = index.query(&[1.0, 0.0], 2).await;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.id, "a");
        assert_eq!(hits[1].chunk.id, "c");
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn fewer_entries_than_k_returns_all() {
        let index = VectorIndex::new();
        index.upsert(chunk("a", 0), vec![1.0, 0.0]).await.unwrap();
        let hits = index.query(&[1.0, 0.0], 5).await;
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn empty_index_returns_empty_not_error() {
        let index = VectorIndex::new();
        let hits = index.query(&[1.0, 0.0], 3).await;
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn ties_keep_insertion_order() {
        let index = VectorIndex::new();
        index.upsert(chunk("first", 0), vec![1.0, 0.0]).await.unwrap();
        index.upsert(chunk("second", 1), vec![1.0, 0.0]).await.unwrap();
        index.upsert(chunk("third", 2), vec![1.0, 0.0]).await.unwrap();

        let hits = index.query(&[1.0, 0.0], 3).await;
        let ids: Vec<_> = hits.iter().map(|h| h.chunk.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn upsert_replaces_existing_id() {
        let index = VectorIndex::new();
        index.upsert(chunk("a", 0), vec![1.0, 0.0]).await.unwrap();
        index.upsert(chunk("a", 0), vec![0.0, 1.0]).await.unwrap();
        assert_eq!(index.len().await, 1);

        let hits = index.query(&[0.0, 1.0], 1).await;
        assert!(hits[0].score > 0.99);
    }

    #[tokio::test]
    async fn rejects_dimension_mismatch() {
        let index = VectorIndex::new();
        index.upsert(chunk("a", 0), vec![1.0, 0.0]).await.unwrap();
        let err = index.upsert(chunk("b", 1), vec![1.0]).await.unwrap_err();
        assert!(matches!(
            err,
            IndexError::VectorSizeMismatch { got: 1, want: 2 }
        ));
    }

    #[tokio::test]
    async fn readiness_flag_starts_false() {
        let index = VectorIndex::new();
        assert!(!index.is_ready());
        index.mark_ready();
        assert!(index.is_ready());
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
