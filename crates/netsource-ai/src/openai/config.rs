//! OpenAI-compatible client configuration.

use std::fmt;
use std::time::Duration;

use netsource_config::ModelConfig;

/// Endpoint, credential and model for an OpenAI-compatible API.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
            model: model.into(),
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Build from the `[model]` settings section, resolving the API key
    /// from the environment when the file leaves it empty.
    pub fn from_settings(settings: &ModelConfig) -> Self {
        Self {
            api_key: settings.resolved_api_key(),
            base_url: settings.base_url.clone(),
            model: settings.name.clone(),
            request_timeout: Duration::from_secs(u64::from(settings.request_timeout_secs)),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
