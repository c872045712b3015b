//! Conversation state: the caller-owned dialogue transcript.
//!
//! The transcript is a single string threaded through requests. It grows by
//! one `(question, answer)` pair per turn and is never truncated here; the
//! windowing policy only bounds what reaches the prompt.

/// Appends one turn to the transcript.
///
/// Pure and deterministic: produces exactly
/// `history + "\nUser: " + question + "\nAI: " + answer`. The caller owns
/// persistence of the result across turns.
pub fn append_turn(history: &str, question: &str, answer: &str) -> String {
    format!("{history}\nUser: {question}\nAI: {answer}")
}

/// Marker that opens every turn written by [`append_turn`].
const TURN_START: &str = "\nUser: ";

/// How much of the transcript is fed into the generation prompt.
///
/// Unbounded append eventually exceeds the generation backend's input limits;
/// `TailChars` bounds the prompt side while the returned transcript stays
/// complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPolicy {
    /// Feed the whole transcript (default; known scalability limitation).
    Unbounded,
    /// Feed only the most recent whole turns fitting in this many characters.
    TailChars(usize),
}

impl HistoryPolicy {
    /// Builds a policy from an optional character budget.
    pub fn from_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(n) => HistoryPolicy::TailChars(n),
            None => HistoryPolicy::Unbounded,
        }
    }

    /// The slice of `history` visible to the prompt under this policy.
    ///
    /// Windowing cuts only at turn starts, so the prompt never sees half a
    /// turn. A single turn larger than the whole budget windows to "".
    pub fn window<'a>(&self, history: &'a str) -> &'a str {
        match *self {
            HistoryPolicy::Unbounded => history,
            HistoryPolicy::TailChars(limit) => tail_turns(history, limit),
        }
    }
}

/// Returns the suffix of `history` that starts at the earliest turn boundary
/// within the last `limit` characters.
fn tail_turns(history: &str, limit: usize) -> &str {
    let total = history.chars().count();
    if total <= limit {
        return history;
    }
    let min_start = history
        .char_indices()
        .nth(total - limit)
        .map(|(idx, _)| idx)
        .unwrap_or(history.len());
    match history[min_start..].find(TURN_START) {
        Some(offset) => &history[min_start + offset..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_turn_matches_exact_format() {
        assert_eq!(append_turn("", "Hi", "Hello"), "\nUser: Hi\nAI: Hello");
    }

    #[test]
    fn append_turn_accumulates() {
        let h1 = append_turn("", "Hi", "Hello");
        let h2 = append_turn(&h1, "Bye", "See you");
        assert_eq!(h2, "\nUser: Hi\nAI: Hello\nUser: Bye\nAI: See you");
    }

    #[test]
    fn unbounded_passes_everything_through() {
        let history = append_turn("", "Hi", "Hello");
        assert_eq!(HistoryPolicy::Unbounded.window(&history), history);
    }

    #[test]
    fn tail_keeps_whole_recent_turns() {
        let mut history = String::new();
        for i in 0..10 {
            history = append_turn(&history, &format!("question {i}"), &format!("answer {i}"));
        }
        let windowed = HistoryPolicy::TailChars(80).window(&history);
        assert!(windowed.chars().count() <= 80);
        assert!(windowed.starts_with("\nUser: "));
        assert!(windowed.ends_with("answer 9"));
    }

    #[test]
    fn short_history_is_untouched() {
        let history = append_turn("", "Hi", "Hello");
        assert_eq!(HistoryPolicy::TailChars(1000).window(&history), history);
    }

    #[test]
    fn oversized_single_turn_windows_to_empty() {
        let history = append_turn("", &"q".repeat(500), "a");
        assert_eq!(HistoryPolicy::TailChars(50).window(&history), "");
    }
}
