use crate::error::ConfigError;

/// Represents the provider (backend) used for model inference.
///
/// This enum distinguishes between a local Ollama runtime and any
/// OpenAI-compatible HTTP API. Adding more providers later (e.g., a dedicated
/// Anthropic client) means extending this enum and the matching service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI-compatible REST API.
    OpenAi,
}

impl Provider {
    /// Parses the `LLM_KIND` environment value.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedProvider`] for anything other than
    /// `ollama` or `openai` (case-insensitive).
    pub fn parse_kind(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Provider::Ollama),
            "openai" | "open-ai" => Ok(Provider::OpenAi),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!(Provider::parse_kind("ollama").unwrap(), Provider::Ollama);
        assert_eq!(Provider::parse_kind(" OpenAI ").unwrap(), Provider::OpenAi);
        assert!(Provider::parse_kind("bedrock").is_err());
    }
}
