use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum NetsourceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("ai error: {0}")]
    Ai(String),

    #[error("speech error: {0}")]
    Speech(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("model.name must not be empty".into());
        assert_eq!(
            err.to_string(),
            "config validation error: model.name must not be empty"
        );
    }

    #[test]
    fn netsource_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: NetsourceError = config_err.into();
        assert!(matches!(err, NetsourceError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn netsource_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "espeak missing");
        let err: NetsourceError = io_err.into();
        assert!(matches!(err, NetsourceError::Io(_)));
        assert!(err.to_string().contains("espeak missing"));
    }

    #[test]
    fn netsource_error_string_variants() {
        let err = NetsourceError::Ai("model unavailable".into());
        assert_eq!(err.to_string(), "ai error: model unavailable");

        let err = NetsourceError::Speech("no audio device".into());
        assert_eq!(err.to_string(), "speech error: no audio device");
    }

    #[test]
    fn question_mark_lifts_into_result_alias() {
        fn read(path: &str) -> crate::Result<String> {
            Ok(std::fs::read_to_string(path)?)
        }
        let err = read("/nonexistent/netsource/config.toml").unwrap_err();
        assert!(matches!(err, NetsourceError::Io(_)));
    }
}
