//! Sub-configuration structs with their defaults.

use crate::types::{ModelSelection, DEFAULT_QUESTION};
use serde::{Deserialize, Serialize};

/// Session defaults used when a front end starts up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Question pre-filled before the user edits it
    pub default_question: String,

    /// Model selected when the session starts
    pub default_model: ModelSelection,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_question: DEFAULT_QUESTION.to_string(),
            default_model: ModelSelection::LlamaVision,
        }
    }
}

/// JPEG encoder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self { jpeg_quality: 75 }
    }
}

/// Constraints applied to images picked by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Accepted file extensions (lowercase, no dot)
    pub supported_formats: Vec<String>,

    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            max_file_size_mb: 200,
        }
    }
}

impl UploadConfig {
    /// Whether a file extension is an accepted upload format.
    pub fn accepts(&self, extension: &str) -> bool {
        let ext = extension.to_ascii_lowercase();
        self.supported_formats.iter().any(|f| *f == ext)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Vision backend configurations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BackendsConfig {
    /// Groq (Llama vision) configuration
    pub groq: GroqConfig,

    /// OpenAI (GPT-4o mini) configuration
    pub openai: OpenAiConfig,
}

impl BackendsConfig {
    /// The settings of the backend that serves a model.
    pub fn for_model(&self, model: ModelSelection) -> BackendSettings<'_> {
        match model {
            ModelSelection::LlamaVision => BackendSettings {
                endpoint: &self.groq.endpoint,
                api_key: &self.groq.api_key,
                model: &self.groq.model,
                max_tokens: self.groq.max_tokens,
                timeout_ms: self.groq.timeout_ms,
            },
            ModelSelection::Gpt4oMini => BackendSettings {
                endpoint: &self.openai.endpoint,
                api_key: &self.openai.api_key,
                model: &self.openai.model,
                max_tokens: self.openai.max_tokens,
                timeout_ms: self.openai.timeout_ms,
            },
        }
    }

    /// Replace the API key of the backend serving `model`.
    pub fn set_api_key(&mut self, model: ModelSelection, api_key: &str) {
        match model {
            ModelSelection::LlamaVision => self.groq.api_key = api_key.to_string(),
            ModelSelection::Gpt4oMini => self.openai.api_key = api_key.to_string(),
        }
    }
}

/// Borrowed view over one backend's settings.
#[derive(Debug, Clone, Copy)]
pub struct BackendSettings<'a> {
    pub endpoint: &'a str,
    pub api_key: &'a str,
    pub model: &'a str,
    pub max_tokens: Option<u32>,
    pub timeout_ms: Option<u64>,
}

/// Groq configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroqConfig {
    /// API base URL; `/chat/completions` is appended
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Response size cap; omitted from the request when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Per-request timeout; the HTTP client default applies when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1".to_string(),
            api_key: "${GROQ_API_KEY}".to_string(),
            model: "llama-3.2-11b-vision-preview".to_string(),
            max_tokens: None,
            timeout_ms: None,
        }
    }
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API base URL; `/chat/completions` is appended
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Response size cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Per-request timeout; the HTTP client default applies when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: Some(300),
            timeout_ms: None,
        }
    }
}
