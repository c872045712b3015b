//! Index build pipeline: load document → chunk → embed → upsert.
//!
//! Embeddings are computed with bounded, order-preserving concurrency. The
//! index is marked ready only after every chunk has been upserted, so readers
//! that arrive mid-build observe "not ready" instead of partial state. The
//! build is deterministic: the same document and chunking configuration
//! reproduce the same chunk IDs and index contents.

use std::path::Path;

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::chunker::ChunkSplitter;
use crate::embed::EmbeddingProvider;
use crate::error::IndexError;
use crate::index::VectorIndex;
use crate::record::Document;

/// Reads a document from disk.
///
/// # Errors
/// Returns [`IndexError::Io`] if the file cannot be read.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, IndexError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "loaded document");
    Ok(Document::new(path.display().to_string(), text))
}

/// Chunks the document, embeds every chunk, and upserts the results into the
/// index, then marks it ready.
///
/// `concurrency` bounds how many embedding requests are in flight at once;
/// results are applied in chunk order.
///
/// # Errors
/// Returns embedding or dimensionality errors; on failure the index is left
/// not-ready and retrieval keeps degrading to empty results.
pub async fn build_index(
    document: &Document,
    splitter: &ChunkSplitter,
    provider: &dyn EmbeddingProvider,
    index: &VectorIndex,
    concurrency: usize,
) -> Result<usize, IndexError> {
    let chunks: Vec<_> = splitter.chunks(document).collect();
    if chunks.is_empty() {
        debug!(source = %document.source, "document produced no chunks");
        index.mark_ready();
        return Ok(0);
    }

    info!(
        source = %document.source,
        chunks = chunks.len(),
        "building vector index"
    );

    let pb = ProgressBar::new(chunks.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap()
        .progress_chars("##-"),
    );

    let mut embedded = futures::stream::iter(chunks.into_iter().map(|chunk| async move {
        let vector = provider.embed(&chunk.text).await;
        (chunk, vector)
    }))
    .buffered(concurrency.max(1));

    let mut total = 0usize;
    while let Some((chunk, vector)) = embedded.next().await {
        index.upsert(chunk, vector?).await?;
        total += 1;
        pb.inc(1);
    }
    pb.finish_and_clear();

    index.mark_ready();
    info!(total, "vector index ready");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::KeywordEmbedder;

    #[tokio::test]
    async fn build_marks_index_ready_and_counts_chunks() {
        let document = Document::new("mem", "alpha beta. gamma delta. ".repeat(20));
        let splitter = ChunkSplitter::new(60, 10).unwrap();
        let index = VectorIndex::new();
        let embedder = KeywordEmbedder::new(&["alpha", "gamma"]);

        let total = build_index(&document, &splitter, &embedder, &index, 4)
            .await
            .unwrap();
        assert!(total > 1);
        assert_eq!(index.len().await, total);
        assert!(index.is_ready());
    }

    #[tokio::test]
    async fn empty_document_builds_an_empty_ready_index() {
        let document = Document::new("mem", "");
        let splitter = ChunkSplitter::new(60, 10).unwrap();
        let index = VectorIndex::new();
        let embedder = KeywordEmbedder::new(&["alpha"]);

        let total = build_index(&document, &splitter, &embedder, &index, 4)
            .await
            .unwrap();
        assert_eq!(total, 0);
        assert!(index.is_ready());
        assert!(index.is_empty().await);
    }

    #[tokio::test]
    async fn rebuild_is_deterministic() {
        let document = Document::new("mem", "one two three four five. ".repeat(10));
        let splitter = ChunkSplitter::new(50, 8).unwrap();
        let embedder = KeywordEmbedder::new(&["one", "three"]);

        let first = VectorIndex::new();
        let second = VectorIndex::new();
        build_index(&document, &splitter, &embedder, &first, 2)
            .await
            .unwrap();
        build_index(&document, &splitter, &embedder, &second, 8)
            .await
            .unwrap();

        let a = first.query(&embedder.vector_for("one"), 3).await;
        let b = second.query(&embedder.vector_for("one"), 3).await;
        let ids_a: Vec<_> = a.iter().map(|h| h.chunk.id.clone()).collect();
        let ids_b: Vec<_> = b.iter().map(|h| h.chunk.id.clone()).collect();
        assert_eq!(ids_a, ids_b);
    }
}
