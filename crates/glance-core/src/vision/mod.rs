//! Vision backends that answer a question about an image.
//!
//! Provides one capability trait over two hosted vision-language models
//! (Llama 3.2 Vision on Groq, GPT-4o mini on OpenAI), a factory that builds
//! them from config, and a per-model registry used by the session.

pub(crate) mod groq;
pub(crate) mod openai;
pub(crate) mod provider;

pub use groq::GroqAnswerer;
pub use openai::OpenAiAnswerer;
pub use provider::{
    env_var_for, provider_label, resolve_env_var, Answerers, VisionAnswerer,
    VisionAnswererFactory,
};
