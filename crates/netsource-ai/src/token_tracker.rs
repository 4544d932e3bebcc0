//! Token usage accounting for a chat session.

use std::collections::HashMap;
use std::fmt;

use crate::TokenUsage;

/// Cumulative token usage, overall and per model.
#[derive(Debug, Clone, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    by_model: HashMap<String, TokenUsage>,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the usage reported for one model call.
    pub fn record(&mut self, model: &str, usage: &TokenUsage) {
        add(&mut self.total, usage);
        add(self.by_model.entry(model.to_string()).or_default(), usage);
        self.call_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn for_model(&self, model: &str) -> Option<&TokenUsage> {
        self.by_model.get(model)
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn add(into: &mut TokenUsage, usage: &TokenUsage) {
    into.input_tokens = into.input_tokens.saturating_add(usage.input_tokens);
    into.output_tokens = into.output_tokens.saturating_add(usage.output_tokens);
}

impl fmt::Display for TokenTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} calls, {} prompt + {} completion = {} tokens",
            self.call_count,
            self.total.input_tokens,
            self.total.output_tokens,
            self.total.total_tokens()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(input: u64, output: u64) -> TokenUsage {
        TokenUsage {
            input_tokens: input,
            output_tokens: output,
        }
    }

    #[test]
    fn accumulates_per_model() {
        let mut tracker = TokenTracker::new();
        tracker.record("gpt-4o-mini", &usage(100, 20));
        tracker.record("gpt-4o-mini", &usage(150, 30));
        tracker.record("llama3", &usage(10, 5));

        assert_eq!(tracker.call_count(), 3);
        assert_eq!(*tracker.total(), usage(260, 55));
        assert_eq!(tracker.for_model("gpt-4o-mini"), Some(&usage(250, 50)));
        assert_eq!(tracker.for_model("llama3"), Some(&usage(10, 5)));
        assert_eq!(tracker.for_model("other"), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut tracker = TokenTracker::new();
        tracker.record("m", &usage(1, 1));
        tracker.reset();
        assert_eq!(tracker.call_count(), 0);
        assert_eq!(tracker.total().total_tokens(), 0);
        assert!(tracker.for_model("m").is_none());
    }

    #[test]
    fn display_summarizes_totals() {
        let mut tracker = TokenTracker::new();
        tracker.record("m", &usage(40, 4));
        assert_eq!(
            tracker.to_string(),
            "1 calls, 40 prompt + 4 completion = 44 tokens"
        );
    }
}
