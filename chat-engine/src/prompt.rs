//! Prompt template with named placeholders.
//!
//! The template carries three required placeholders (`{context}`,
//! `{history}`, `{question}`) and is validated once at startup, never
//! per-request. Rendering is a single pass: substituted values are inserted
//! verbatim and never re-scanned, so retrieved text containing placeholder
//! syntax cannot corrupt the prompt.

use thiserror::Error;

/// Required placeholder was absent from the configured template.
///
/// Fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("prompt template is missing required placeholder {{{0}}}")]
pub struct TemplateError(pub &'static str);

/// Placeholder names, in substitution-priority order.
const PLACEHOLDERS: [&str; 3] = ["context", "history", "question"];

/// The built-in generation template.
///
/// This is the formatting-expert variant: it instructs the model to answer in
/// rich Markdown, which the bundled chat page renders client-side.
pub const DEFAULT_TEMPLATE: &str = r#"
**You are a formatting expert** answering with rich Markdown. Use:
# Headings
- Bullet points
**Bold text**
*Italic text*
[Links](https://example.com)
Paragraph separations

Context: {context}
History: {history}

Question: {question}

Answer:
"#;

/// A validated generation prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Validates that every required placeholder is present.
    ///
    /// # Errors
    /// Returns [`TemplateError`] naming the first missing placeholder.
    pub fn new(text: impl Into<String>) -> Result<Self, TemplateError> {
        let text = text.into();
        for name in PLACEHOLDERS {
            if !text.contains(&format!("{{{name}}}")) {
                return Err(TemplateError(name));
            }
        }
        Ok(Self { text })
    }

    /// Substitutes the three placeholders in one pass.
    ///
    /// Template content around the placeholders is preserved verbatim, with
    /// no reformatting, truncation, or escaping of the inserted values. A `{`
    /// that does not open a known placeholder is kept as-is.
    pub fn render(&self, context: &str, history: &str, question: &str) -> String {
        let substitutions = [
            ("{context}", context),
            ("{history}", history),
            ("{question}", question),
        ];

        let mut out = String::with_capacity(
            self.text.len() + context.len() + history.len() + question.len(),
        );
        let mut rest = self.text.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open..];
            match substitutions.iter().find(|(pat, _)| after.starts_with(pat)) {
                Some((pat, value)) => {
                    out.push_str(value);
                    rest = &after[pat.len()..];
                }
                None => {
                    out.push('{');
                    rest = &after[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE).expect("built-in template carries every placeholder")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_is_valid() {
        let t = PromptTemplate::default();
        let rendered = t.render("CTX", "HIST", "Q?");
        assert!(rendered.contains("Context: CTX"));
        assert!(rendered.contains("History: HIST"));
        assert!(rendered.contains("Question: Q?"));
    }

    #[test]
    fn missing_placeholder_is_named() {
        let err = PromptTemplate::new("Context: {context}\nQuestion: {question}").unwrap_err();
        assert_eq!(err, TemplateError("history"));
        assert!(err.to_string().contains("{history}"));
    }

    #[test]
    fn empty_context_renders_blank_not_marker() {
        let t = PromptTemplate::new("[{context}] h={history} q={question}").unwrap();
        assert_eq!(t.render("", "past", "now?"), "[] h=past q=now?");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let t = PromptTemplate::new("{context}|{history}|{question}").unwrap();
        let rendered = t.render("see {history} for details", "H", "Q");
        assert_eq!(rendered, "see {history} for details|H|Q");
    }

    #[test]
    fn unknown_braces_survive_verbatim() {
        let t = PromptTemplate::new("{json} {context} {history} {question} {").unwrap();
        assert_eq!(t.render("c", "h", "q"), "{json} c h q {");
    }
}
