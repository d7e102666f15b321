//! Error types for Glance.
//!
//! Errors are split by concern: configuration, getting an image ready for
//! transport, and talking to a vision backend. Each carries enough context
//! (file path, provider, HTTP status) to be actionable on its own.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Glance operations.
///
/// Backend failures are not here: they become `AnswerText::Failed`.
#[derive(Error, Debug)]
pub enum GlanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image upload, decode or encode errors
    #[error("Image error: {0}")]
    Encode(#[from] EncodeError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while turning a file or in-memory image into transport text.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File could not be read
    #[error("Cannot read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// File extension is not an accepted upload format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// File exceeds the upload size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image bytes could not be decoded
    #[error("Decode error for {name}: {message}")]
    Decode { name: String, message: String },

    /// JPEG serialization failed
    #[error("JPEG encode failed: {0}")]
    Encode(String),
}

/// Errors from a vision backend call.
///
/// Kept distinct so callers can tell an unreachable service from bad
/// credentials or an unexpected response shape. The interactive front end
/// still collapses all of them into the `"Error"` sentinel.
#[derive(Error, Debug)]
pub enum VisionError {
    /// No API key configured for the backend
    #[error("{provider} API key not set. Set {env_var} or add it to the config file.")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },

    /// The request never produced a response (DNS, connect, TLS, timeout)
    #[error("{provider} request failed: {message}")]
    Request {
        provider: &'static str,
        message: String,
    },

    /// Non-2xx response
    #[error("{provider} HTTP {status_code}: {message}")]
    Http {
        provider: &'static str,
        status_code: u16,
        message: String,
    },

    /// Response body was not the expected JSON shape
    #[error("Failed to parse {provider} response: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },

    /// Response parsed but carried no answer text
    #[error("{provider} returned no content")]
    EmptyResponse { provider: &'static str },
}

impl VisionError {
    /// HTTP status code, when the backend answered with one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            VisionError::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Convenience type alias for Glance results.
pub type Result<T> = std::result::Result<T, GlanceError>;
