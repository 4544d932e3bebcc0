//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use netsource_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_netsource_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
system_prompt = "Answer in French."

[model]
name = "mistral-small"
default_temperature = 0.2

[search]
wikipedia_lang = "fr"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.system_prompt, "Answer in French.");
    assert_eq!(config.model.name, "mistral-small");
    assert!((config.model.default_temperature - 0.2).abs() < f64::EPSILON);
    assert_eq!(config.search.wikipedia_lang, "fr");
    // Defaults preserved
    assert_eq!(config.model.base_url, "https://api.openai.com/v1");
    assert_eq!(config.search.max_results, 5);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_does_not_validate_ranges() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[search]\nmax_results = 500\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.search.max_results, 500);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("netsource").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.model.name, "gpt-4o-mini");
    assert_eq!(config.ui.app_title, "NetSourceAI");
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::NetsourceConfig;

    let config: NetsourceConfig = toml::from_str(&default_config_toml()).unwrap();
    assert_eq!(config.search.num_sentences, 3);
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("netsource"));
        assert!(path_str.ends_with("config.toml"));
    }
}
