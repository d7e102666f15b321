//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

/// Largest accepted `upload.max_file_size_mb` (10 GiB).
const MAX_FILE_SIZE_LIMIT_MB: u64 = 10 * 1024;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.encoder.jpeg_quality) {
            return Err(ConfigError::ValidationError(
                "encoder.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.upload.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "upload.supported_formats must not be empty".into(),
            ));
        }
        if self.upload.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "upload.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.upload.max_file_size_mb > MAX_FILE_SIZE_LIMIT_MB {
            return Err(ConfigError::ValidationError(format!(
                "upload.max_file_size_mb must be <= {MAX_FILE_SIZE_LIMIT_MB}"
            )));
        }
        if self.session.default_question.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "session.default_question must not be empty".into(),
            ));
        }
        if self.backends.groq.timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "backends.groq.timeout_ms must be > 0".into(),
            ));
        }
        if self.backends.openai.timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "backends.openai.timeout_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}
