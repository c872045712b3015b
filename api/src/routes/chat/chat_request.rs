use serde::{Deserialize, Serialize};

/// Request payload for /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Natural language question. Absent fields default to empty.
    #[serde(default)]
    pub question: String,
    /// Caller-held conversation context; empty for a new session.
    #[serde(default)]
    pub context: String,
}

/// Response payload for /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Raw model answer; Markdown formatting is preserved exactly.
    pub response: String,
    /// Updated conversation context to thread into the next request.
    pub context: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_default_to_empty() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.question, "");
        assert_eq!(req.context, "");

        let req: ChatRequest = serde_json::from_str(r#"{"question":"hi"}"#).unwrap();
        assert_eq!(req.question, "hi");
        assert_eq!(req.context, "");
    }
}
