//! Shared state and startup wiring for all HTTP handlers.

use std::sync::Arc;

use chat_engine::{ChatEngine, HistoryPolicy, PromptTemplate, ServiceGenerator};
use doc_index::{ChunkSplitter, ServiceEmbedder, VectorIndex, build_index, load_document};
use llm_service::LlmService;
use tracing::{error, info, warn};

use crate::error_handler::AppError;

/// Startup settings consumed from environment variables.
///
/// All fields have defaults; the document path mirrors the sample corpus
/// shipped with the repository.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path of the document to ground answers in.
    pub document_path: String,
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Character overlap between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Optional path of a custom prompt template.
    pub template_path: Option<String>,
    /// Optional character budget for history fed into the prompt.
    pub history_max_chars: Option<usize>,
    /// In-flight embedding requests during the index build.
    pub embedding_concurrency: usize,
    /// Optional expected embedding dimension (sanity check).
    pub embedding_dim: Option<usize>,
}

impl Settings {
    /// Builds settings from environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            document_path: env("DOCUMENT_PATH", "data/document.txt"),
            chunk_size: parse("CHUNK_SIZE", 1000usize),
            chunk_overlap: parse("CHUNK_OVERLAP", 200usize),
            top_k: parse("RAG_TOP_K", 3usize),
            template_path: std::env::var("PROMPT_TEMPLATE_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            history_max_chars: opt_parse("HISTORY_MAX_CHARS"),
            embedding_concurrency: parse("EMBEDDING_CONCURRENCY", 4usize),
            embedding_dim: opt_parse("EMBEDDING_DIM"),
        }
    }
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Per-turn orchestrator with all collaborators injected.
    pub engine: ChatEngine,
    /// Shared LLM service, kept for the health endpoint.
    pub llm: Arc<LlmService>,
}

impl AppState {
    /// Validates configuration, wires the engine, and builds the index.
    ///
    /// Chunking, template, and provider configuration problems are fatal. A
    /// failed index build is not: the server starts with a not-ready index
    /// and answers ungrounded rather than refusing to start.
    ///
    /// # Errors
    /// Returns [`AppError::Startup`] for any fatal initialization problem.
    pub async fn initialize() -> Result<Self, AppError> {
        let settings = Settings::from_env();

        let splitter = ChunkSplitter::new(settings.chunk_size, settings.chunk_overlap)
            .map_err(|e| AppError::Startup(e.to_string()))?;

        let template = match &settings.template_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| AppError::Startup(format!("cannot read {path}: {e}")))?;
                PromptTemplate::new(text).map_err(|e| AppError::Startup(e.to_string()))?
            }
            None => PromptTemplate::default(),
        };

        let llm =
            Arc::new(LlmService::from_env().map_err(|e| AppError::Startup(e.to_string()))?);
        for status in llm.health_all().await {
            if status.ok {
                info!(
                    provider = %status.provider,
                    model = %status.model,
                    latency_ms = status.latency_ms,
                    "LLM backend reachable"
                );
            } else {
                warn!(
                    provider = %status.provider,
                    model = %status.model,
                    message = %status.message,
                    "LLM backend unreachable at startup"
                );
            }
        }

        let index = Arc::new(VectorIndex::new());
        let embedder = Arc::new(ServiceEmbedder::new(llm.clone(), settings.embedding_dim));

        match load_document(&settings.document_path) {
            Ok(document) => {
                match build_index(
                    &document,
                    &splitter,
                    embedder.as_ref(),
                    &index,
                    settings.embedding_concurrency,
                )
                .await
                {
                    Ok(total) => info!(total, source = %document.source, "index build complete"),
                    Err(e) => error!(error = %e, "index build failed; serving ungrounded"),
                }
            }
            Err(e) => error!(
                error = %e,
                path = %settings.document_path,
                "cannot load document; serving ungrounded"
            ),
        }

        let engine = ChatEngine::new(
            index,
            embedder,
            Arc::new(ServiceGenerator::new(llm.clone())),
            template,
            settings.top_k,
            HistoryPolicy::from_limit(settings.history_max_chars),
        );

        Ok(Self { engine, llm })
    }
}

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn opt_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
