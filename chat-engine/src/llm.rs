//! Generation seam over the shared LLM service.
//!
//! The engine depends on the [`Generator`] trait, not on a concrete backend,
//! so tests can stub generation deterministically. [`ServiceGenerator`]
//! adapts `llm_service::LlmService`, translating its timeout into the
//! distinct timeout variant of [`GenerationFailure`].

use std::{future::Future, pin::Pin, sync::Arc};

use llm_service::{LlmError, LlmService};

use crate::error::GenerationFailure;

/// Provider interface for answer generation.
pub trait Generator: Send + Sync {
    /// Sends an assembled prompt and returns the raw model answer.
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationFailure>> + Send + 'a>>;
}

/// Generator backed by the shared [`LlmService`] generation profile.
#[derive(Clone)]
pub struct ServiceGenerator {
    svc: Arc<LlmService>,
}

impl ServiceGenerator {
    /// Constructs a new generator over the shared service.
    pub fn new(svc: Arc<LlmService>) -> Self {
        Self { svc }
    }
}

impl Generator for ServiceGenerator {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationFailure>> + Send + 'a>> {
        Box::pin(async move {
            self.svc.generate(prompt).await.map_err(|e| match e {
                LlmError::Timeout(elapsed) => GenerationFailure::Timeout(elapsed),
                other => GenerationFailure::Backend(other.to_string()),
            })
        })
    }
}
