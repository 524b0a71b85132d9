//! Conversation history windowing (spec §4.9).
//!
//! The core never performs summarization itself — summarization is I/O
//! (a call to a cheap model) that belongs to the caller's scheduler. This
//! module only windows the transcript and raises a flag.

/// One turn's token count, paired positionally with the transcript.
pub type TurnTokens = u32;

/// The result of windowing a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryWindow<T> {
    /// A summary carried in from a previous invocation, passed through
    /// unchanged.
    pub prior_summary: Option<String>,
    /// The trailing `max_turns` messages, in original order.
    pub window: Vec<T>,
    pub total_tokens: u32,
    pub turn_count: u32,
    /// Set when the transcript has grown enough that a background worker
    /// should summarize it (turn_count > 10 or total tokens > 20000).
    pub needs_summarization: bool,
}

const DEFAULT_MAX_TURNS: usize = 6;
const SUMMARIZATION_TURN_THRESHOLD: u32 = 10;
const SUMMARIZATION_TOKEN_THRESHOLD: u32 = 20_000;

/// Window a conversation's messages, pairing each with its token count.
///
/// `messages` and `token_counts` must be the same length; if they aren't,
/// only the overlapping prefix is considered (the core prefers a well-typed
/// but short window over panicking on mismatched input).
pub fn window<T: Clone>(
    messages: &[T],
    token_counts: &[TurnTokens],
    prior_summary: Option<String>,
    max_turns: Option<usize>,
) -> HistoryWindow<T> {
    let max_turns = max_turns.unwrap_or(DEFAULT_MAX_TURNS);
    let len = messages.len().min(token_counts.len());
    let messages = &messages[..len];
    let token_counts = &token_counts[..len];

    let total_tokens: u32 = token_counts.iter().sum();
    let turn_count = len as u32;

    let window_start = len.saturating_sub(max_turns);
    let window = messages[window_start..].to_vec();

    let needs_summarization =
        turn_count > SUMMARIZATION_TURN_THRESHOLD || total_tokens > SUMMARIZATION_TOKEN_THRESHOLD;

    HistoryWindow {
        prior_summary,
        window,
        total_tokens,
        turn_count,
        needs_summarization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_trailing_max_turns() {
        let messages: Vec<u32> = (0..10).collect();
        let tokens = vec![10; 10];
        let result = window(&messages, &tokens, None, None);
        assert_eq!(result.window, vec![4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn short_transcript_is_kept_whole() {
        let messages = vec!["a", "b", "c"];
        let tokens = vec![10, 10, 10];
        let result = window(&messages, &tokens, None, None);
        assert_eq!(result.window, vec!["a", "b", "c"]);
        assert!(!result.needs_summarization);
    }

    #[test]
    fn needs_summarization_on_turn_count() {
        let messages: Vec<u32> = (0..11).collect();
        let tokens = vec![1; 11];
        let result = window(&messages, &tokens, None, None);
        assert!(result.needs_summarization);
    }

    #[test]
    fn needs_summarization_on_total_tokens() {
        let messages = vec!["a", "b"];
        let tokens = vec![15_000, 10_000];
        let result = window(&messages, &tokens, None, None);
        assert!(result.needs_summarization);
    }

    #[test]
    fn prior_summary_passes_through_unchanged() {
        let result = window(&["a"], &[1], Some("earlier context".to_string()), None);
        assert_eq!(result.prior_summary.as_deref(), Some("earlier context"));
    }

    #[test]
    fn custom_max_turns_is_respected() {
        let messages: Vec<u32> = (0..5).collect();
        let tokens = vec![1; 5];
        let result = window(&messages, &tokens, None, Some(2));
        assert_eq!(result.window, vec![3, 4]);
    }
}
