//! Glance Core - ask a hosted vision-language model about an image.
//!
//! Glance is a thin client: it encodes an image as base64 JPEG, sends it with
//! a question to one of two vision backends, and hands back the answer text.
//!
//! # Architecture
//!
//! ```text
//! Image → JPEG → base64 → data URL ─┬→ Groq (Llama 3.2 Vision) ─┬→ AnswerText
//!                                    └→ OpenAI (GPT-4o mini) ───┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use glance_core::{Config, Glance, ModelSelection};
//!
//! #[tokio::main]
//! async fn main() -> glance_core::Result<()> {
//!     let glance = Glance::new(Config::load()?);
//!
//!     let mut session = glance.session();
//!     session.set_image(image::open("./ad.png").unwrap());
//!     session.select_model(ModelSelection::Gpt4oMini);
//!
//!     if let Some(answer) = glance.submit(&session).await? {
//!         println!("{answer}");
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod encode;
pub mod error;
pub mod session;
pub mod types;
pub mod upload;
pub mod vision;

// Re-exports for convenient access
pub use config::Config;
pub use encode::{EncodedImage, ImageEncoder};
pub use error::{ConfigError, EncodeError, GlanceError, Result, VisionError};
pub use session::Session;
pub use types::{Answer, AnswerText, ModelSelection, DEFAULT_QUESTION, ERROR_SENTINEL};
pub use upload::ImageUpload;
pub use vision::{Answerers, VisionAnswerer, VisionAnswererFactory};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Glance client - configuration plus the backends built from it.
pub struct Glance {
    config: Config,
    answerers: Answerers,
}

impl Glance {
    /// Create a client, building every backend that has an API key.
    pub fn new(config: Config) -> Self {
        tracing::debug!("Initializing Glance v{}", VERSION);
        let answerers = Answerers::from_config(&config.backends);
        Self { config, answerers }
    }

    /// Create a client with explicitly supplied backends.
    pub fn with_answerers(config: Config, answerers: Answerers) -> Self {
        Self { config, answerers }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn answerers(&self) -> &Answerers {
        &self.answerers
    }

    /// Start a new session with the configured defaults.
    pub fn session(&self) -> Session {
        Session::new(&self.config)
    }

    /// Load an image file under the configured upload constraints.
    pub fn load_image(&self, path: &std::path::Path) -> Result<ImageUpload> {
        Ok(ImageUpload::from_path(path, &self.config.upload)?)
    }

    /// Submit a session to its selected backend.
    pub async fn submit(&self, session: &Session) -> Result<Option<AnswerText>> {
        Ok(session.submit(&self.answerers).await?)
    }
}
