//! Configuration management for Glance.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. All config structs implement `Default`, so a missing file or a
//! partial one both work.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Glance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session defaults (question, model)
    pub session: SessionConfig,

    /// JPEG encoder settings
    pub encoder: EncoderConfig,

    /// Upload constraints
    pub upload: UploadConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Vision backend settings
    pub backends: BackendsConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.glance.glance/config.toml
    /// - Linux: ~/.config/glance/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\glance\config\config.toml
    ///
    /// Falls back to ~/.glance/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "glance", "glance")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let expanded = shellexpand::tilde("~/.glance/config.toml");
                PathBuf::from(expanded.into_owned())
            })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelSelection;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.session.default_question, "Analyze this advertising campaign");
        assert_eq!(config.session.default_model, ModelSelection::LlamaVision);
        assert_eq!(config.encoder.jpeg_quality, 75);
        assert_eq!(config.upload.max_file_size_mb, 200);
    }

    #[test]
    fn test_backend_defaults() {
        let config = Config::default();
        let groq = config.backends.for_model(ModelSelection::LlamaVision);
        assert_eq!(groq.model, "llama-3.2-11b-vision-preview");
        assert_eq!(groq.max_tokens, None);

        let openai = config.backends.for_model(ModelSelection::Gpt4oMini);
        assert_eq!(openai.endpoint, "https://api.openai.com/v1");
        assert_eq!(openai.model, "gpt-4o-mini");
        assert_eq!(openai.max_tokens, Some(300));
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[session]"));
        assert!(toml.contains("[backends.openai]"));
        assert!(toml.contains("default_model = \"llama\""));
    }

    #[test]
    fn test_partial_section_keeps_its_own_defaults() {
        let config = Config::from_toml(
            r#"
            [backends.openai]
            api_key = "sk-test"
            "#,
        )
        .unwrap();
        assert_eq!(config.backends.openai.api_key, "sk-test");
        assert_eq!(config.backends.openai.model, "gpt-4o-mini");
        assert_eq!(config.backends.groq.api_key, "${GROQ_API_KEY}");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\ndefault_model = \"gpt-4o-mini\"\ndefault_question = \"What is this?\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.session.default_model, ModelSelection::Gpt4oMini);
        assert_eq!(config.session.default_question, "What is this?");
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[encoder]\njpeg_quality = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_set_api_key_targets_one_backend() {
        let mut config = Config::default();
        config.backends.set_api_key(ModelSelection::Gpt4oMini, "sk-session");
        assert_eq!(config.backends.openai.api_key, "sk-session");
        assert_eq!(config.backends.groq.api_key, "${GROQ_API_KEY}");
    }
}
