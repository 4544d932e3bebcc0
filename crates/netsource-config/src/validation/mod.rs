//! Full configuration validation.
//!
//! Validates numeric ranges, endpoint settings and the Wikipedia language
//! code. Each domain has its own submodule; this orchestrator calls them
//! all and collects errors into a single `ConfigError`.

mod helpers;
mod model;
mod search;

#[cfg(test)]
mod tests;

use crate::schema::NetsourceConfig;
use netsource_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &NetsourceConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if config.system_prompt.trim().is_empty() {
        errors.push("system_prompt must not be empty".into());
    }

    model::validate_model(&mut errors, config);
    search::validate_search(&mut errors, config);

    if config.speech.command.trim().is_empty() {
        errors.push("speech.command must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
