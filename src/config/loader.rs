//! Configuration loading from disk.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::EngineConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate the pattern configuration from a TOML file.
///
/// Over-long patterns are truncated in place (see `validation`); structural
/// problems are reported as errors.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: EngineConfig = toml::from_str(&content)?;

    validate_config(&mut config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_basic_config() {
        let path = write_temp(
            "url_engine_loader_basic.toml",
            r#"
[[set]]
key = 1
patterns = ["/api/*", "*.png"]

[[set]]
key = 7
patterns = ["host.com/*"]
"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.sets.len(), 2);
        assert_eq!(config.sets[0].key, 1);
        assert_eq!(config.sets[0].patterns, vec!["/api/*", "*.png"]);
        assert_eq!(config.sets[1].key, 7);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/url_engine.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_malformed_toml() {
        let path = write_temp("url_engine_loader_bad.toml", "[[set]\nkey=1");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
