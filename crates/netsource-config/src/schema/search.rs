//! Search provider tuning knobs.

use serde::{Deserialize, Serialize};

/// Web search safe-search level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    On,
    #[default]
    Moderate,
    Off,
}

/// Web search and Wikipedia settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Web results to summarize (valid range: 1-25).
    pub max_results: u32,
    /// Sentences kept per page summary (valid range: 1-20).
    pub num_sentences: u32,
    /// Wikipedia language edition, e.g. "en" or "fr".
    pub wikipedia_lang: String,
    /// Wikipedia pages summarized per query (valid range: 1-10).
    pub wikipedia_pages: u32,
    pub safesearch: SafeSearch,
    /// Timeout for each search or page request (valid range: 1-120).
    pub fetch_timeout_secs: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            num_sentences: 3,
            wikipedia_lang: "en".into(),
            wikipedia_pages: 3,
            safesearch: SafeSearch::Moderate,
            fetch_timeout_secs: 10,
        }
    }
}
