//! NetSource configuration system.
//!
//! Provides TOML-based settings for the model endpoint, the research
//! tools, speech output and logging. All sections use sensible defaults
//! so partial configs work out of the box. The settings object is built
//! once at startup and handed to every component that needs it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use netsource_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    LogLevel, LoggingConfig, ModelConfig, NetsourceConfig, SafeSearch, SearchConfig,
    SpeechConfig, ToolsConfig, UiConfig, API_KEY_ENV_VARS,
};

use std::path::Path;

use netsource_common::ConfigError;

/// Load, then validate, the settings.
///
/// With `path` set the file must exist. Without it the platform default
/// location is used and a commented default file is created on first run.
pub fn load_config(path: Option<&Path>) -> Result<NetsourceConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string, with the API key
/// redacted.
pub fn config_to_json(config: &NetsourceConfig) -> String {
    let mut redacted = config.clone();
    if !redacted.model.api_key.is_empty() {
        redacted.model.api_key = "[REDACTED]".to_string();
    }
    serde_json::to_string_pretty(&redacted)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
