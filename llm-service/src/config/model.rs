use std::time::Duration;

use crate::config::provider::Provider;
use crate::error::{ConfigError, Result, validate_http_endpoint};

/// Configuration for one model profile (generation or embedding).
///
/// A single struct covers both providers; provider-specific fields are
/// optional (`api_key` matters only for OpenAI).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// The provider/backend (e.g., Ollama, OpenAI).
    pub provider: Provider,

    /// Model identifier string (e.g., `"llama3.2"`, `"gpt-4o-mini"`).
    pub model: String,

    /// Inference endpoint (local server or remote API base URL).
    pub endpoint: String,

    /// Optional API key for providers that require authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 = deterministic).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds (client-enforced).
    pub timeout_secs: Option<u64>,
}

impl ModelConfig {
    /// Validates the fields that every provider requires.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyModel`] if the model name is blank
    /// - [`ConfigError::InvalidFormat`] if the endpoint has no http scheme
    /// - [`ConfigError::MissingApiKey`] if OpenAI is selected without a key
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("endpoint", &self.endpoint)?;
        if self.provider == Provider::OpenAi && self.api_key.is_none() {
            return Err(ConfigError::MissingApiKey("OpenAI").into());
        }
        Ok(())
    }

    /// The client-enforced request timeout, defaulting to 60 seconds.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(60))
    }

    /// Endpoint base with any trailing slash removed.
    pub fn endpoint_base(&self) -> String {
        self.endpoint.trim().trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ollama_cfg() -> ModelConfig {
        ModelConfig {
            provider: Provider::Ollama,
            model: "llama3.2".into(),
            endpoint: "http://localhost:11434/".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn validates_and_normalizes() {
        let cfg = ollama_cfg();
        cfg.validate().unwrap();
        assert_eq!(cfg.endpoint_base(), "http://localhost:11434");
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn rejects_blank_model_and_missing_key() {
        let mut cfg = ollama_cfg();
        cfg.model = "  ".into();
        assert!(cfg.validate().is_err());

        let mut cfg = ollama_cfg();
        cfg.provider = Provider::OpenAi;
        assert!(cfg.validate().is_err());
    }
}
