//! Embedding provider seam.
//!
//! Async is required because real providers (Ollama, OpenAI) perform HTTP
//! requests. Implement this trait to plug in another embedding backend, or a
//! deterministic stub in tests.

use crate::error::IndexError;
use std::{future::Future, pin::Pin};

/// Provider interface for embedding generation.
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single text into a fixed-dimension vector.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>>;
}

pub mod service;
