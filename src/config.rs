use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::transcript::Theme;

/// Optional YAML configuration. A missing file yields defaults; the
/// credential is deliberately not configurable here and lives only in
/// transient session state.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Initially selected provider id. Unknown ids fall back to the first
    /// registered provider at startup.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Deadline for one chat-completion call.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Initial color theme.
    #[serde(default)]
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            request_timeout_seconds: default_request_timeout(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.request_timeout_seconds, 60);
        assert_eq!(config.theme, Theme::Light);
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_defaults() {
        let tmp_dir = TempDir::new().unwrap();
        let missing_path = tmp_dir.path().join("missing-config.yaml");
        let config = Config::load(missing_path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.request_timeout_seconds, 60);
    }

    #[tokio::test]
    async fn test_load_valid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
provider: "deepseek"
request_timeout_seconds: 30
theme: dark
"#
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(config.provider, "deepseek");
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_load_partial_yaml_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
provider: "deepseek"
"#
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(config.provider, "deepseek");
        assert_eq!(config.request_timeout_seconds, 60); // default
        assert_eq!(config.theme, Theme::Light); // default
    }

    #[tokio::test]
    async fn test_load_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(file.path().to_str().unwrap()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_config_error_display() {
        let io_error = ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "test",
        ));
        assert!(io_error.to_string().contains("failed to read config file"));
    }
}
