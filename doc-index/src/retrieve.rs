//! Retrieval: embed a query and rank indexed chunks against it.

use tracing::{debug, trace};

use crate::embed::EmbeddingProvider;
use crate::error::IndexError;
use crate::index::VectorIndex;
use crate::record::ScoredChunk;

/// Retrieves the `top_k` chunks most similar to `query`.
///
/// If the index is not ready yet, returns an empty result immediately: the
/// caller degrades to ungrounded generation instead of failing the request.
/// The embedder is not invoked in that case.
///
/// # Errors
/// Returns [`IndexError::EmbeddingFailure`] if the embedding backend fails;
/// this is a request-level error, distinct from the empty-but-valid
/// degradation above.
pub async fn retrieve(
    index: &VectorIndex,
    provider: &dyn EmbeddingProvider,
    query: &str,
    top_k: usize,
) -> Result<Vec<ScoredChunk>, IndexError> {
    if !index.is_ready() {
        debug!("vector index not ready; returning empty retrieval");
        return Ok(Vec::new());
    }

    let query_vector = provider.embed(query).await?;
    let hits = index.query(&query_vector, top_k).await;
    trace!(top_k, hits = hits.len(), "retrieve finished");
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Chunk;
    use crate::testing::{FailingEmbedder, KeywordEmbedder};

    fn chunk(id: &str, seq: u32, text: &str) -> Chunk {
        Chunk {
            id: id.to_string(),
            seq,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn not_ready_index_short_circuits_without_embedding() {
        let index = VectorIndex::new();
        let embedder = KeywordEmbedder::new(&["paris"]);

        let hits = retrieve(&index, &embedder, "where is paris?", 3)
            .await
            .unwrap();
        assert!(hits.is_empty());
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn ready_index_ranks_by_similarity() {
        let index = VectorIndex::new();
        let embedder = KeywordEmbedder::new(&["paris", "rust"]);

        let texts = [
            ("a", "Paris is the capital of France."),
            ("b", "Rust is a systems programming language."),
            ("c", "Paris hosts the Rust conference, in Paris."),
        ];
        for (i, (id, text)) in texts.iter().enumerate() {
            let v = embedder.vector_for(text);
            index.upsert(chunk(id, i as u32, text), v).await.unwrap();
        }
        index.mark_ready();

        let hits = retrieve(&index, &embedder, "tell me about paris", 2)
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.id, "a");
    }

    #[tokio::test]
    async fn embedding_failure_is_an_error_not_empty() {
        let index = VectorIndex::new();
        let embedder = KeywordEmbedder::new(&["x"]);
        index
            .upsert(chunk("a", 0, "x"), embedder.vector_for("x"))
            .await
            .unwrap();
        index.mark_ready();

        let err = retrieve(&index, &FailingEmbedder, "query", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, IndexError::EmbeddingFailure(_)));
    }
}
