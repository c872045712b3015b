//! RAG chat orchestration with a single public entry point.
//!
//! [`ChatEngine::answer`] runs one turn: it retrieves top-k chunks for the
//! question, assembles the grounding context with the (windowed) conversation
//! history into the configured prompt template, calls the generation backend,
//! and appends the turn to the caller-owned transcript.
//!
//! The vector index handle, the embedding provider, and the generator are all
//! injected at construction, so there is no ambient shared state and every
//! seam is stubbable in tests.

pub mod error;
pub mod history;
pub mod llm;
pub mod prompt;

pub use error::{ChatError, GenerationFailure};
pub use history::{HistoryPolicy, append_turn};
pub use llm::{Generator, ServiceGenerator};
pub use prompt::{DEFAULT_TEMPLATE, PromptTemplate, TemplateError};

use std::sync::Arc;

use doc_index::{EmbeddingProvider, VectorIndex, retrieve};
use tracing::debug;

/// One completed turn: the raw model answer plus the updated transcript.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    /// Raw generated answer; Markdown is preserved exactly.
    pub response: String,
    /// Updated conversation context for the caller to thread into the next
    /// turn.
    pub context: String,
}

/// Per-turn orchestrator, constructed once at startup.
pub struct ChatEngine {
    index: Arc<VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn Generator>,
    template: PromptTemplate,
    top_k: usize,
    history_policy: HistoryPolicy,
}

impl ChatEngine {
    /// Wires the engine from its injected collaborators.
    ///
    /// `top_k` comes from configuration; `template` has already been
    /// validated at startup.
    pub fn new(
        index: Arc<VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn Generator>,
        template: PromptTemplate,
        top_k: usize,
        history_policy: HistoryPolicy,
    ) -> Self {
        Self {
            index,
            embedder,
            generator,
            template,
            top_k,
            history_policy,
        }
    }

    /// Runs one chat turn.
    ///
    /// Degradations that are *not* errors: a not-ready index and an empty
    /// retrieval both produce an empty grounding block, and generation
    /// proceeds ungrounded.
    ///
    /// # Errors
    /// - [`ChatError::Retrieval`] if the embedding backend fails
    /// - [`ChatError::Generation`] if generation fails or times out
    pub async fn answer(&self, question: &str, history: &str) -> Result<ChatTurn, ChatError> {
        let hits = retrieve(&self.index, self.embedder.as_ref(), question, self.top_k).await?;
        let grounding = hits
            .iter()
            .map(|h| h.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        debug!(
            hits = hits.len(),
            grounding_chars = grounding.len(),
            "assembled grounding context"
        );

        let visible_history = self.history_policy.window(history);
        let prompt = self.template.render(&grounding, visible_history, question);

        let response = self.generator.generate(&prompt).await?;
        let context = append_turn(history, question, &response);
        Ok(ChatTurn { response, context })
    }
}
