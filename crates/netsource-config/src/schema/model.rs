//! Model endpoint configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variables consulted, in order, when `model.api_key` is empty.
pub const API_KEY_ENV_VARS: &[&str] = &["NETSOURCE_API_KEY", "OPENAI_API_KEY"];

/// OpenAI-compatible chat-completion endpoint settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub base_url: String,
    /// Empty means "read from the environment".
    pub api_key: String,
    /// Valid range: 0.0-2.0.
    pub default_temperature: f64,
    /// Valid range: 1-600.
    pub request_timeout_secs: u32,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("default_temperature", &self.default_temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gpt-4o-mini".into(),
            base_url: "https://api.openai.com/v1".into(),
            api_key: String::new(),
            default_temperature: 0.7,
            request_timeout_secs: 120,
        }
    }
}

impl ModelConfig {
    /// The credential to send, if any.
    ///
    /// Local OpenAI-compatible servers often need none, so a missing key
    /// is not an error.
    pub fn resolved_api_key(&self) -> Option<String> {
        if !self.api_key.is_empty() {
            return Some(self.api_key.clone());
        }
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = ModelConfig {
            api_key: "sk-very-secret".into(),
            ..ModelConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        let config = ModelConfig {
            api_key: "sk-from-file".into(),
            ..ModelConfig::default()
        };
        assert_eq!(config.resolved_api_key().as_deref(), Some("sk-from-file"));
    }
}
