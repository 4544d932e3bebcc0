//! Chat front-end and speech output settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub app_title: String,
    /// Speak answers aloud at startup; toggled at runtime with `/voice`.
    pub sound_enabled: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            app_title: "NetSourceAI".into(),
            sound_enabled: false,
        }
    }
}

/// External text-to-speech command. The answer text is written to its stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: "espeak".into(),
            args: Vec::new(),
        }
    }
}
