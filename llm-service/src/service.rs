//! Shared LLM service with two active profiles: **generation** and **embedding**.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Clients are built eagerly from the two profile configs; both profiles may
//!   point at the same backend with different models.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_service::LlmService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), llm_service::LlmError> {
//!     let svc = Arc::new(LlmService::from_env()?);
//!
//!     let txt = svc.generate("Hello world").await?;
//!     println!("GEN: {txt}");
//!
//!     let emb = svc.embed("Ferris").await?;
//!     println!("Embedding dim = {}", emb.len());
//!     Ok(())
//! }
//! ```

use tracing::info;

use crate::config::{self, ModelConfig, Provider};
use crate::error::Result;
use crate::health::{HealthService, HealthStatus};
use crate::providers::ollama::OllamaClient;
use crate::providers::openai::OpenAiClient;

/// One constructed provider client.
enum ProviderClient {
    Ollama(OllamaClient),
    OpenAi(OpenAiClient),
}

impl ProviderClient {
    fn new(cfg: ModelConfig) -> Result<Self> {
        match cfg.provider {
            Provider::Ollama => Ok(ProviderClient::Ollama(OllamaClient::new(cfg)?)),
            Provider::OpenAi => Ok(ProviderClient::OpenAi(OpenAiClient::new(cfg)?)),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            ProviderClient::Ollama(c) => c.generate(prompt).await,
            ProviderClient::OpenAi(c) => c.generate(prompt).await,
        }
    }

    async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        match self {
            ProviderClient::Ollama(c) => c.embeddings(input).await,
            ProviderClient::OpenAi(c) => c.embeddings(input).await,
        }
    }
}

/// Shared service that manages the **generation** and **embedding** profiles.
pub struct LlmService {
    generation: ModelConfig,
    embedding: ModelConfig,
    generation_client: ProviderClient,
    embedding_client: ProviderClient,
    health: HealthService,
}

impl LlmService {
    /// Creates a new service with explicit profile configs.
    ///
    /// # Errors
    /// Returns [`crate::LlmError`] if either config fails validation or a
    /// client cannot be built.
    pub fn new(generation: ModelConfig, embedding: ModelConfig) -> Result<Self> {
        let generation_client = ProviderClient::new(generation.clone())?;
        let embedding_client = ProviderClient::new(embedding.clone())?;
        info!(
            generation_model = %generation.model,
            embedding_model = %embedding.model,
            provider = ?generation.provider,
            "LlmService initialized"
        );
        Ok(Self {
            generation,
            embedding,
            generation_client,
            embedding_client,
            health: HealthService::new(None)?,
        })
    }

    /// Creates the service from environment variables (see
    /// [`config::defaults`]).
    ///
    /// # Errors
    /// Propagates configuration errors; fatal at startup by design.
    pub fn from_env() -> Result<Self> {
        let generation = config::generation_from_env()?;
        let embedding = config::embedding_from_env()?;
        Self::new(generation, embedding)
    }

    /// Generates text using the **generation** profile.
    ///
    /// # Errors
    /// Returns [`crate::LlmError`] if generation fails or times out.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.generation_client.generate(prompt).await
    }

    /// Computes an embedding using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`crate::LlmError`] if embedding fails or times out.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>> {
        self.embedding_client.embeddings(input).await
    }

    /// Returns a health snapshot for the distinct profiles.
    ///
    /// If the embedding profile equals the generation profile, it is probed
    /// only once.
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        let mut statuses = vec![self.health.check(&self.generation).await];
        if self.embedding != self.generation {
            statuses.push(self.health.check(&self.embedding).await);
        }
        statuses
    }

    /// Returns references to the current profiles `(generation, embedding)`.
    pub fn profiles(&self) -> (&ModelConfig, &ModelConfig) {
        (&self.generation, &self.embedding)
    }
}
