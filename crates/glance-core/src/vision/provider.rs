//! Vision answerer trait, factory and per-model registry.
//!
//! Every backend answers the same question: given a base64 JPEG and a
//! question, return one piece of text. The factory builds the right backend
//! for a [`ModelSelection`] from config, with the API key passed in
//! explicitly at construction.

use crate::config::BackendsConfig;
use crate::encode::EncodedImage;
use crate::error::VisionError;
use crate::types::{Answer, ModelSelection, ERROR_SENTINEL};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use super::groq::GroqAnswerer;
use super::openai::OpenAiAnswerer;

/// Trait that all vision backends implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn VisionAnswerer>` for dynamic dispatch).
#[async_trait]
pub trait VisionAnswerer: Send + Sync {
    /// Provider name for logging (e.g., "Groq", "OpenAI").
    fn name(&self) -> &str;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    /// Ask `question` about `image`. One attempt, no retries.
    async fn answer(&self, image: &EncodedImage, question: &str) -> Result<Answer, VisionError>;

    /// Like [`answer`](Self::answer), but never fails: any error is logged
    /// and replaced by the `"Error"` sentinel.
    async fn answer_text(&self, image: &EncodedImage, question: &str) -> String {
        match self.answer(image, question).await {
            Ok(answer) => answer.text,
            Err(e) => {
                tracing::warn!("{} answer failed: {e}", self.name());
                ERROR_SENTINEL.to_string()
            }
        }
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Environment variable conventionally holding a backend's API key.
pub fn env_var_for(model: ModelSelection) -> &'static str {
    match model {
        ModelSelection::LlamaVision => "GROQ_API_KEY",
        ModelSelection::Gpt4oMini => "OPENAI_API_KEY",
    }
}

/// Name of the service hosting a model.
pub fn provider_label(model: ModelSelection) -> &'static str {
    match model {
        ModelSelection::LlamaVision => "Groq",
        ModelSelection::Gpt4oMini => "OpenAI",
    }
}

/// Factory that creates the backend serving a model from config.
pub struct VisionAnswererFactory;

impl VisionAnswererFactory {
    /// Create the answerer for `model`.
    ///
    /// Fails with [`VisionError::MissingApiKey`] when the configured key is
    /// empty or points at an unset environment variable.
    pub fn create(
        model: ModelSelection,
        config: &BackendsConfig,
    ) -> Result<Box<dyn VisionAnswerer>, VisionError> {
        let settings = config.for_model(model);
        let api_key =
            resolve_env_var(settings.api_key).ok_or_else(|| VisionError::MissingApiKey {
                provider: provider_label(model),
                env_var: env_var_for(model),
            })?;
        let timeout = settings.timeout_ms.map(Duration::from_millis);

        match model {
            ModelSelection::LlamaVision => Ok(Box::new(
                GroqAnswerer::new(settings.endpoint, &api_key, settings.model)
                    .with_max_tokens(settings.max_tokens)
                    .with_timeout(timeout),
            )),
            ModelSelection::Gpt4oMini => Ok(Box::new(
                OpenAiAnswerer::with_endpoint(settings.endpoint, &api_key, settings.model)
                    .with_max_tokens(settings.max_tokens)
                    .with_timeout(timeout),
            )),
        }
    }
}

/// One answerer per selectable model.
///
/// A backend without an API key is simply absent; asking it yields
/// [`VisionError::MissingApiKey`] at submission time instead of failing
/// start-up for the other backend.
#[derive(Default)]
pub struct Answerers {
    entries: HashMap<ModelSelection, Box<dyn VisionAnswerer>>,
}

impl Answerers {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every backend that has an API key configured.
    pub fn from_config(config: &BackendsConfig) -> Self {
        let mut answerers = Self::new();
        for model in ModelSelection::ALL {
            match VisionAnswererFactory::create(model, config) {
                Ok(answerer) => answerers.insert(model, answerer),
                Err(e) => tracing::debug!("{model} backend unavailable: {e}"),
            }
        }
        answerers
    }

    /// Register (or replace) the answerer for a model.
    pub fn insert(&mut self, model: ModelSelection, answerer: Box<dyn VisionAnswerer>) {
        self.entries.insert(model, answerer);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, model: ModelSelection, answerer: Box<dyn VisionAnswerer>) -> Self {
        self.insert(model, answerer);
        self
    }

    /// Whether a backend is configured for `model`.
    pub fn is_available(&self, model: ModelSelection) -> bool {
        self.entries.contains_key(&model)
    }

    /// The answerer for `model`.
    pub fn get(&self, model: ModelSelection) -> Result<&dyn VisionAnswerer, VisionError> {
        self.entries
            .get(&model)
            .map(|a| a.as_ref())
            .ok_or(VisionError::MissingApiKey {
                provider: provider_label(model),
                env_var: env_var_for(model),
            })
    }
}
