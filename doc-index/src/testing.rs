//! Deterministic embedding providers for tests.
//!
//! [`KeywordEmbedder`] maps text to keyword-occurrence counts, so similarity
//! behaves predictably without any model backend. [`FailingEmbedder`] always
//! errors, for exercising failure paths.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::embed::EmbeddingProvider;
use crate::error::IndexError;

/// Embeds text as a vector of per-keyword occurrence counts.
///
/// The vector dimension equals the number of keywords. Matching is
/// case-insensitive. Every call is counted, so tests can assert whether the
/// embedder was reached at all.
pub struct KeywordEmbedder {
    keywords: Vec<String>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    /// Creates an embedder over the given keyword dimensions.
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// The deterministic vector for a text, without counting a call.
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .map(|k| lower.matches(k.as_str()).count() as f32)
            .collect()
    }

    /// Number of `embed` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl EmbeddingProvider for KeywordEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>,
    > {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.vector_for(text))
        })
    }
}

/// Embedder that fails every call with [`IndexError::EmbeddingFailure`].
#[derive(Default)]
pub struct FailingEmbedder;

impl EmbeddingProvider for FailingEmbedder {
    fn embed<'a>(
        &'a self,
        _text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>,
    > {
        Box::pin(async { Err(IndexError::EmbeddingFailure("stub backend down".into())) })
    }
}
