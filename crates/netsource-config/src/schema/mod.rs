//! Configuration schema types for NetSource.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod model;
mod search;
mod system;
mod tools;
mod ui;

pub use model::*;
pub use search::*;
pub use system::*;
pub use tools::*;
pub use ui::*;

use serde::{Deserialize, Serialize};

/// Instruction message that opens every conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are NetSourceAI, a research assistant. \
When a question needs current or factual information, use the available tools \
to search the web, look up Wikipedia, or read the current date and time. \
Base your answer on the tool results and cite the URLs you relied on.";

/// Root configuration for NetSource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetsourceConfig {
    pub system_prompt: String,
    pub model: ModelConfig,
    pub search: SearchConfig,
    pub tools: ToolsConfig,
    pub ui: UiConfig,
    pub speech: SpeechConfig,
    pub logging: LoggingConfig,
}

impl Default for NetsourceConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: ModelConfig::default(),
            search: SearchConfig::default(),
            tools: ToolsConfig::default(),
            ui: UiConfig::default(),
            speech: SpeechConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_model() {
        let config = NetsourceConfig::default();
        assert_eq!(config.model.name, "gpt-4o-mini");
        assert_eq!(config.model.base_url, "https://api.openai.com/v1");
        assert!(config.model.api_key.is_empty());
        assert!((config.model.default_temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.model.request_timeout_secs, 120);
    }

    #[test]
    fn default_config_has_expected_search() {
        let config = NetsourceConfig::default();
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.num_sentences, 3);
        assert_eq!(config.search.wikipedia_lang, "en");
        assert_eq!(config.search.wikipedia_pages, 3);
        assert_eq!(config.search.safesearch, SafeSearch::Moderate);
        assert_eq!(config.search.fetch_timeout_secs, 10);
    }

    #[test]
    fn default_config_has_expected_ui_and_speech() {
        let config = NetsourceConfig::default();
        assert_eq!(config.ui.app_title, "NetSourceAI");
        assert!(!config.ui.sound_enabled);
        assert_eq!(config.speech.command, "espeak");
        assert!(config.speech.args.is_empty());
        assert!(config.tools.definitions_path.is_none());
        assert!(!config.tools.parallel);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: NetsourceConfig = toml::from_str(
            r#"
[model]
name = "llama3.1"
base_url = "http://localhost:11434/v1"

[search]
safesearch = "off"
"#,
        )
        .unwrap();
        assert_eq!(config.model.name, "llama3.1");
        assert_eq!(config.search.safesearch, SafeSearch::Off);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn unknown_safesearch_is_rejected() {
        let result: Result<NetsourceConfig, _> = toml::from_str("[search]\nsafesearch = \"strict\"\n");
        assert!(result.is_err());
    }
}
