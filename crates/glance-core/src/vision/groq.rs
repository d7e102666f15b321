//! Groq vision backend (OpenAI-compatible API).
//!
//! Groq serves Llama 3.2 Vision behind the same Chat Completions format as
//! OpenAI, so this delegates to `OpenAiAnswerer` with Groq's endpoint.

use super::openai::OpenAiAnswerer;
use super::provider::VisionAnswerer;
use crate::encode::EncodedImage;
use crate::error::VisionError;
use crate::types::Answer;
use async_trait::async_trait;
use std::time::Duration;

/// Groq provider wrapping an OpenAI-compatible endpoint.
pub struct GroqAnswerer {
    inner: OpenAiAnswerer,
}

impl GroqAnswerer {
    pub fn new(endpoint: &str, api_key: &str, model: &str) -> Self {
        Self {
            inner: OpenAiAnswerer::compatible("Groq", endpoint, api_key, model),
        }
    }

    pub fn with_max_tokens(self, max_tokens: Option<u32>) -> Self {
        Self {
            inner: self.inner.with_max_tokens(max_tokens),
        }
    }

    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        Self {
            inner: self.inner.with_timeout(timeout),
        }
    }
}

#[async_trait]
impl VisionAnswerer for GroqAnswerer {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn answer(&self, image: &EncodedImage, question: &str) -> Result<Answer, VisionError> {
        self.inner.answer(image, question).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_request_has_no_max_tokens() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .match_header("authorization", "Bearer gsk-test")
            .match_body(Matcher::Json(json!({
                "model": "llama-3.2-11b-vision-preview",
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "Analyze this advertising campaign"},
                        {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,AAAA"}}
                    ]
                }]
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"A bold red poster."}}]}"#)
            .expect(1)
            .create_async()
            .await;

        let groq = GroqAnswerer::new(
            &format!("{}/openai/v1", server.url()),
            "gsk-test",
            "llama-3.2-11b-vision-preview",
        );
        let answer = groq
            .answer(
                &EncodedImage::from_base64("AAAA"),
                "Analyze this advertising campaign",
            )
            .await
            .unwrap();

        assert_eq!(answer.text, "A bold red poster.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_errors_name_groq() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let groq = GroqAnswerer::new(&format!("{}/openai/v1", server.url()), "k", "m");
        let err = groq
            .answer(&EncodedImage::from_base64("AAAA"), "q")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Groq HTTP 429"));
    }
}
