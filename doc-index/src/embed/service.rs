//! Embedding provider backed by `llm-service`.

use std::sync::Arc;

use crate::embed::EmbeddingProvider;
use crate::error::IndexError;
use llm_service::LlmService;

/// Embedder that delegates to the shared [`LlmService`] embedding profile.
///
/// When `expect_dim` is set (e.g., from `EMBEDDING_DIM`), vectors of any other
/// size are rejected before they can poison the index.
#[derive(Clone)]
pub struct ServiceEmbedder {
    svc: Arc<LlmService>,
    expect_dim: Option<usize>,
}

impl ServiceEmbedder {
    /// Constructs a new embedder over the shared service.
    pub fn new(svc: Arc<LlmService>, expect_dim: Option<usize>) -> Self {
        Self { svc, expect_dim }
    }
}

impl EmbeddingProvider for ServiceEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>,
    > {
        Box::pin(async move {
            let vector = self
                .svc
                .embed(text)
                .await
                .map_err(|e| IndexError::EmbeddingFailure(e.to_string()))?;

            if let Some(want) = self.expect_dim {
                if vector.len() != want {
                    return Err(IndexError::VectorSizeMismatch {
                        got: vector.len(),
                        want,
                    });
                }
            }
            Ok(vector)
        })
    }
}
