//! Default model configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`ModelConfig`], one per
//! profile:
//!
//! - **Generation** → the model that answers questions
//! - **Embedding**  → the model that turns text into vectors
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = provider kind (`ollama` (default) or `openai`)
//! - `LLM_MAX_TOKENS`   = optional generation token cap (u32)
//! - `LLM_TIMEOUT_SECS` = optional generation timeout (default 120)
//! - `EMBEDDING_TIMEOUT_SECS` = optional embedding timeout (default 30)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`    = generation model (mandatory)
//! - `EMBEDDING_MODEL` = embedding model (mandatory)
//!
//! OpenAI-specific:
//! - `OPENAI_URL`             = API base (default `https://api.openai.com`)
//! - `OPENAI_API_KEY`         = bearer token (mandatory)
//! - `OPENAI_MODEL`           = generation model (mandatory)
//! - `OPENAI_EMBEDDING_MODEL` = embedding model (mandatory)

use crate::config::model::ModelConfig;
use crate::config::provider::Provider;
use crate::error::{ConfigError, LlmError, Result, env_opt_u32, env_opt_u64, must_env};

/// Resolves the configured provider kind, defaulting to Ollama.
fn provider_kind() -> Result<Provider> {
    match std::env::var("LLM_KIND") {
        Ok(v) if !v.trim().is_empty() => Provider::parse_kind(&v).map_err(LlmError::from),
        _ => Ok(Provider::Ollama),
    }
}

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(LlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Constructs the **generation** profile from environment.
///
/// # Errors
/// Propagates [`ConfigError`] for missing/invalid variables; the result is
/// validated before being returned.
pub fn generation_from_env() -> Result<ModelConfig> {
    let provider = provider_kind()?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;
    let timeout_secs = Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(120));

    let cfg = match provider {
        Provider::Ollama => ModelConfig {
            provider,
            model: must_env("OLLAMA_MODEL")?,
            endpoint: ollama_endpoint()?,
            api_key: None,
            max_tokens,
            temperature: None,
            top_p: None,
            timeout_secs,
        },
        Provider::OpenAi => ModelConfig {
            provider,
            model: must_env("OPENAI_MODEL")?,
            endpoint: std::env::var("OPENAI_URL")
                .unwrap_or_else(|_| "https://api.openai.com".into()),
            api_key: Some(must_env("OPENAI_API_KEY")?),
            max_tokens,
            temperature: None,
            top_p: None,
            timeout_secs,
        },
    };

    cfg.validate()?;
    Ok(cfg)
}

/// Constructs the **embedding** profile from environment.
///
/// # Errors
/// Propagates [`ConfigError`] for missing/invalid variables; the result is
/// validated before being returned.
pub fn embedding_from_env() -> Result<ModelConfig> {
    let provider = provider_kind()?;
    let timeout_secs = Some(env_opt_u64("EMBEDDING_TIMEOUT_SECS")?.unwrap_or(30));

    let cfg = match provider {
        Provider::Ollama => ModelConfig {
            provider,
            model: must_env("EMBEDDING_MODEL")?,
            endpoint: ollama_endpoint()?,
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs,
        },
        Provider::OpenAi => ModelConfig {
            provider,
            model: must_env("OPENAI_EMBEDDING_MODEL")?,
            endpoint: std::env::var("OPENAI_URL")
                .unwrap_or_else(|_| "https://api.openai.com".into()),
            api_key: Some(must_env("OPENAI_API_KEY")?),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs,
        },
    };

    cfg.validate()?;
    Ok(cfg)
}
