//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = NetsourceConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_empty_model_name() {
    let mut config = NetsourceConfig::default();
    config.model.name = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.name"));
}

#[test]
fn catches_base_url_without_scheme() {
    let mut config = NetsourceConfig::default();
    config.model.base_url = "api.openai.com/v1".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.base_url"));
}

#[test]
fn catches_temperature_out_of_range() {
    let mut config = NetsourceConfig::default();
    config.model.default_temperature = -0.1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.default_temperature"));
}

#[test]
fn catches_zero_max_results() {
    let mut config = NetsourceConfig::default();
    config.search.max_results = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("search.max_results"));
}

#[test]
fn catches_bad_wikipedia_lang() {
    let mut config = NetsourceConfig::default();
    config.search.wikipedia_lang = "English".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("search.wikipedia_lang"));
}

#[test]
fn accepts_regional_wikipedia_lang() {
    let mut config = NetsourceConfig::default();
    config.search.wikipedia_lang = "zh-yue".into();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_empty_system_prompt() {
    let mut config = NetsourceConfig::default();
    config.system_prompt = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("system_prompt"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = NetsourceConfig::default();
    config.search.num_sentences = 0;
    config.model.request_timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("search.num_sentences"));
    assert!(err.contains("model.request_timeout_secs"));
    assert!(err.contains("; "));
}
