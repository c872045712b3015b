//! Lightweight health probes for LLM backends (Ollama, OpenAI).
//!
//! Probes are reachability checks only:
//! - Ollama: `GET {endpoint}/api/tags`
//! - OpenAI: `GET {endpoint}/v1/models` with Bearer auth
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a
//! `/health` endpoint. [`HealthService::check`] is resilient and never fails;
//! any error is mapped to `ok = false`.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::warn;

use crate::config::{ModelConfig, Provider};
use crate::error::{LlmError, Result, make_snippet};

/// A serializable health snapshot for a single profile.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g., "Ollama", "OpenAi").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier the profile is configured with.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured probe latency in milliseconds.
    pub latency_ms: u64,
    /// Short human-readable message with details.
    pub message: String,
}

/// A health checker that reuses a single short-timeout HTTP client.
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// Creates a new health service with an optional probe timeout (seconds,
    /// default 10).
    ///
    /// # Errors
    /// Returns [`LlmError::Transport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LlmError::Transport)?;
        Ok(Self { client })
    }

    /// Probes a single profile, routing to the provider-specific URL.
    ///
    /// This method is **resilient**: it never returns an error. Any failure is
    /// converted to `HealthStatus { ok: false, .. }`.
    pub async fn check(&self, cfg: &ModelConfig) -> HealthStatus {
        let base = cfg.endpoint_base();
        let started = Instant::now();

        let result = match cfg.provider {
            Provider::Ollama => self.client.get(format!("{base}/api/tags")).send().await,
            Provider::OpenAi => {
                let mut req = self.client.get(format!("{base}/v1/models"));
                if let Some(key) = &cfg.api_key {
                    req = req.bearer_auth(key);
                }
                req.send().await
            }
        };
        let latency_ms = started.elapsed().as_millis() as u64;

        let (ok, message) = match result {
            Ok(resp) if resp.status().is_success() => (true, "reachable".to_string()),
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                (false, format!("HTTP {status}: {}", make_snippet(&body)))
            }
            Err(e) => (false, e.to_string()),
        };

        if !ok {
            warn!(
                provider = ?cfg.provider,
                endpoint = %cfg.endpoint,
                %message,
                "health probe failed"
            );
        }

        HealthStatus {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok,
            latency_ms,
            message,
        }
    }
}
