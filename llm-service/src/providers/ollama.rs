//! Lightweight Ollama client for text generation and embeddings.
//!
//! This module implements a thin client for the local Ollama API:
//! - `POST {endpoint}/api/generate`   — synchronous text generation (`stream=false`)
//! - `POST {endpoint}/api/embeddings` — embeddings retrieval
//!
//! It uses the universal configuration [`ModelConfig`] and ensures that the
//! selected provider is [`Provider::Ollama`]. The request timeout from the
//! config is enforced by the HTTP client and surfaces as
//! [`LlmError::Timeout`], distinct from other transport failures.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ModelConfig, Provider};
use crate::error::{ConfigError, LlmError, Result, make_snippet, send_error};

/// Thin client for Ollama.
///
/// Initialized with a full [`ModelConfig`]. Reuses an HTTP client with the
/// configured timeout. Provides two high-level calls:
/// - [`OllamaClient::generate`]   — non-streaming text generation
/// - [`OllamaClient::embeddings`] — embeddings retrieval
pub struct OllamaClient {
    client: reqwest::Client,
    cfg: ModelConfig,
    timeout: Duration,
    url_generate: String,
    url_embeddings: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

impl OllamaClient {
    /// Creates a new [`OllamaClient`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::UnsupportedProvider`] if `cfg.provider` is not Ollama
    /// - [`ConfigError::InvalidFormat`] if the endpoint is invalid
    /// - [`LlmError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: ModelConfig) -> Result<Self> {
        if cfg.provider != Provider::Ollama {
            return Err(ConfigError::UnsupportedProvider(format!("{:?}", cfg.provider)).into());
        }
        cfg.validate()?;

        let timeout = cfg.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LlmError::Transport)?;

        let base = cfg.endpoint_base();
        let url_generate = format!("{base}/api/generate");
        let url_embeddings = format!("{base}/api/embeddings");

        Ok(Self {
            client,
            cfg,
            timeout,
            url_generate,
            url_embeddings,
        })
    }

    /// Performs a **non-streaming** generation request via `/api/generate`.
    ///
    /// Mapped options:
    /// - `model`       ← `self.cfg.model`
    /// - `prompt`      ← argument
    /// - `num_predict` ← `self.cfg.max_tokens`
    /// - `temperature` ← `self.cfg.temperature`
    /// - `top_p`       ← `self.cfg.top_p`
    ///
    /// # Errors
    /// - [`LlmError::Timeout`] if the request exceeds the configured timeout
    /// - [`LlmError::Transport`] for other client/network failures
    /// - [`LlmError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::Decode`] if the JSON cannot be parsed
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let started = Instant::now();
        let options = self.options();
        let body = GenerateRequest {
            model: &self.cfg.model,
            prompt,
            stream: false,
            options,
        };

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        let text = self.success_body(resp, &self.url_generate).await?;
        let out: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Decode(e.to_string()))?;

        debug!(
            latency_ms = started.elapsed().as_millis() as u64,
            response_len = out.response.len(),
            "ollama generation finished"
        );
        Ok(out.response)
    }

    /// Retrieves an embedding vector via `/api/embeddings`.
    ///
    /// # Errors
    /// Same surface as [`OllamaClient::generate`].
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            prompt: input,
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
        Ok(out.embedding)
    }

    fn options(&self) -> Option<GenerateOptions> {
        if self.cfg.max_tokens.is_none()
            && self.cfg.temperature.is_none()
            && self.cfg.top_p.is_none()
        {
            return None;
        }
        Some(GenerateOptions {
            num_predict: self.cfg.max_tokens,
            temperature: self.cfg.temperature,
            top_p: self.cfg.top_p,
        })
    }

    /// Returns the response body if the status was 2xx, otherwise a
    /// [`LlmError::HttpStatus`] carrying a short body snippet.
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
            provider: Provider::Ollama,
            model: "llama3.2".into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: Some(256),
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn builds_urls_from_endpoint() {
        let cli = OllamaClient::new(cfg()).unwrap();
        assert_eq!(cli.url_generate, "http://localhost:11434/api/generate");
        assert_eq!(cli.url_embeddings, "http://localhost:11434/api/embeddings");
    }

    #[test]
    fn rejects_wrong_provider() {
        let mut c = cfg();
        c.provider = Provider::OpenAi;
        c.api_key = Some("sk-test".into());
        assert!(OllamaClient::new(c).is_err());
    }

    #[test]
    fn options_omitted_when_unset() {
        let mut c = cfg();
        c.max_tokens = None;
        c.temperature = None;
        let cli = OllamaClient::new(c).unwrap();
        assert!(cli.options().is_none());
    }
}
