//! Request orchestration: one submission, one backend call.
//!
//! A `Session` holds what the front end collects from the user (image,
//! question, model). `submit` encodes the image, hands it to the selected
//! backend and returns a displayable [`AnswerText`].

use image::DynamicImage;

use crate::config::Config;
use crate::encode::ImageEncoder;
use crate::error::EncodeError;
use crate::types::{AnswerText, ModelSelection};
use crate::vision::Answerers;

/// Per-user state between submissions.
#[derive(Debug, Clone)]
pub struct Session {
    image: Option<DynamicImage>,
    question: String,
    model: ModelSelection,
    encoder: ImageEncoder,
}

impl Session {
    /// Start a session with the configured default question and model.
    pub fn new(config: &Config) -> Self {
        Self {
            image: None,
            question: config.session.default_question.clone(),
            model: config.session.default_model,
            encoder: ImageEncoder::new(config.encoder.clone()),
        }
    }

    pub fn set_image(&mut self, image: DynamicImage) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn select_model(&mut self, model: ModelSelection) {
        self.model = model;
    }

    pub fn model(&self) -> ModelSelection {
        self.model
    }

    /// Ask the selected backend about the current image.
    ///
    /// Returns `Ok(None)` without contacting any backend when no image is
    /// set. Otherwise exactly one backend call is made; its failure comes
    /// back as `AnswerText::Failed`, not as an `Err`. Only image encoding
    /// errors propagate.
    pub async fn submit(&self, answerers: &Answerers) -> Result<Option<AnswerText>, EncodeError> {
        let Some(image) = self.image.as_ref() else {
            tracing::debug!("Submit ignored: no image selected");
            return Ok(None);
        };

        let encoded = self.encoder.encode(image)?;

        let answerer = match answerers.get(self.model) {
            Ok(answerer) => answerer,
            Err(e) => {
                tracing::warn!("{} not available: {e}", self.model);
                return Ok(Some(AnswerText::Failed(e)));
            }
        };

        tracing::info!("Asking {} ({})...", answerer.name(), answerer.model());
        let result = answerer.answer(&encoded, &self.question).await;
        if let Err(ref e) = result {
            tracing::warn!("{} answer failed: {e}", answerer.name());
        }

        Ok(Some(AnswerText::from(result)))
    }
}
