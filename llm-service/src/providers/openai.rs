//! OpenAI-compatible client for text generation and embeddings.
//!
//! Minimal, non-streaming client around the OpenAI REST API. Endpoints are
//! derived from [`ModelConfig::endpoint`]:
//! - `POST {endpoint}/v1/chat/completions` — chat completion (non-streaming)
//! - `POST {endpoint}/v1/embeddings`       — embeddings retrieval
//!
//! Constructor validation:
//! - `cfg.provider` must be [`Provider::OpenAi`]
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ModelConfig, Provider};
use crate::error::{ConfigError, LlmError, Result, make_snippet, send_error};

/// Thin client for an OpenAI-compatible API.
///
/// Constructed from a complete [`ModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` with bearer-auth default headers and the
/// configured timeout.
pub struct OpenAiClient {
    client: reqwest::Client,
    cfg: ModelConfig,
    timeout: Duration,
    url_chat: String,
    url_embeddings: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingsDatum>,
}

#[derive(Deserialize)]
struct EmbeddingsDatum {
    embedding: Vec<f32>,
}

impl OpenAiClient {
    /// Creates a new [`OpenAiClient`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::UnsupportedProvider`] if `cfg.provider` is not OpenAI
    /// - [`ConfigError::MissingApiKey`] if `cfg.api_key` is `None`
    /// - [`ConfigError::InvalidFormat`] if the endpoint is invalid
    /// - [`LlmError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: ModelConfig) -> Result<Self> {
        if cfg.provider != Provider::OpenAi {
            return Err(ConfigError::UnsupportedProvider(format!("{:?}", cfg.provider)).into());
        }
        cfg.validate()?;
        let api_key = cfg
            .api_key
            .clone()
            .ok_or(ConfigError::MissingApiKey("OpenAI"))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| LlmError::Decode(format!("invalid API key header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let timeout = cfg.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(LlmError::Transport)?;

        let base = cfg.endpoint_base();
        let url_chat = format!("{base}/v1/chat/completions");
        let url_embeddings = format!("{base}/v1/embeddings");

        Ok(Self {
            client,
            cfg,
            timeout,
            url_chat,
            url_embeddings,
        })
    }

    /// Performs a **non-streaming** chat completion (`/v1/chat/completions`)
    /// with a single user message.
    ///
    /// # Errors
    /// - [`LlmError::Timeout`] if the request exceeds the configured timeout
    /// - [`LlmError::Transport`] for other client/network failures
    /// - [`LlmError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::Decode`] if the JSON cannot be parsed or has no choices
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let started = Instant::now();
        let body = ChatRequest {
            model: &self.cfg.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.cfg.max_tokens,
            temperature: self.cfg.temperature,
            top_p: self.cfg.top_p,
        };

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_chat
        );

        let resp = self
            .client
            .post(&self.url_chat)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        let text = self.success_body(resp, &self.url_chat).await?;
        let out: ChatResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Decode(e.to_string()))?;
        let answer = out
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Decode("chat completion returned no choices".into()))?;

        debug!(
            latency_ms = started.elapsed().as_millis() as u64,
            response_len = answer.len(),
            "openai generation finished"
        );
        Ok(answer)
    }

    /// Retrieves a single embedding vector via `/v1/embeddings`.
    ///
    /// # Errors
    /// Same surface as [`OpenAiClient::generate`].
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            input,
        };

        debug!(
            model = %self.cfg.model,
            input_len = input.len(),
            "POST {}", self.url_embeddings
        );

        let resp = self
            .client
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        let text = self.success_body(resp, &self.url_embeddings).await?;
        let out: EmbeddingsResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Decode(e.to_string()))?;
        out.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| LlmError::Decode("embeddings response had no data".into()))
    }

    async fn success_body(&self, resp: reqwest::Response, url: &str) -> Result<String> {
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| send_error(e, self.timeout))?;
        if status.is_success() {
            Ok(text)
        } else {
            Err(LlmError::HttpStatus {
                status,
                url: url.to_string(),
                snippet: make_snippet(&text),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ModelConfig {
        ModelConfig {
            provider: Provider::OpenAi,
            model: "gpt-4o-mini".into(),
            endpoint: "https://api.openai.com".into(),
            api_key: Some("sk-test".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn builds_urls_from_endpoint() {
        let cli = OpenAiClient::new(cfg()).unwrap();
        assert_eq!(cli.url_chat, "https://api.openai.com/v1/chat/completions");
        assert_eq!(cli.url_embeddings, "https://api.openai.com/v1/embeddings");
    }

    #[test]
    fn requires_api_key() {
        let mut c = cfg();
        c.api_key = None;
        assert!(OpenAiClient::new(c).is_err());
    }
}
