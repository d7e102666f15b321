//! OpenAI vision backend using the Chat Completions API.
//!
//! Sends the question and the image (as a data URL) as two content parts of
//! a single user message.

use super::provider::VisionAnswerer;
use crate::encode::EncodedImage;
use crate::error::VisionError;
use crate::types::Answer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// OpenAI provider using Chat Completions API.
///
/// Also drives any OpenAI-compatible endpoint (see `GroqAnswerer`).
pub struct OpenAiAnswerer {
    provider: &'static str,
    api_key: String,
    model: String,
    url: String,
    max_tokens: Option<u32>,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl OpenAiAnswerer {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_endpoint(OPENAI_ENDPOINT, api_key, model)
    }

    /// Create with a custom API base URL (e.g. a proxy or a test server).
    pub fn with_endpoint(endpoint: &str, api_key: &str, model: &str) -> Self {
        Self::compatible("OpenAI", endpoint, api_key, model)
    }

    /// Create for another provider speaking the same wire format.
    pub(crate) fn compatible(
        provider: &'static str,
        endpoint: &str,
        api_key: &str,
        model: &str,
    ) -> Self {
        Self {
            provider,
            api_key: api_key.to_string(),
            model: model.to_string(),
            url: format!("{}/chat/completions", endpoint.trim_end_matches('/')),
            max_tokens: None,
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    /// Cap the response length. `None` leaves `max_tokens` out of the request.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Per-request timeout. `None` keeps the HTTP client default.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn request_body(&self, image: &EncodedImage, question: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ChatContent::Text {
                        text: question.to_string(),
                    },
                    ChatContent::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                        },
                    },
                ],
            }],
            max_tokens: self.max_tokens,
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ChatContent>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ChatContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[async_trait]
impl VisionAnswerer for OpenAiAnswerer {
    fn name(&self) -> &str {
        self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn answer(&self, image: &EncodedImage, question: &str) -> Result<Answer, VisionError> {
        let start = Instant::now();
        let body = self.request_body(image, question);

        let mut request = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let resp = request.send().await.map_err(|e| VisionError::Request {
            provider: self.provider,
            message: e.to_string(),
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| VisionError::Request {
            provider: self.provider,
            message: format!("reading response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(VisionError::Http {
                provider: self.provider,
                status_code: status.as_u16(),
                message: text,
            });
        }

        let chat_resp: ChatResponse =
            serde_json::from_str(&text).map_err(|e| VisionError::Parse {
                provider: self.provider,
                message: e.to_string(),
            })?;

        let content = chat_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or(VisionError::EmptyResponse {
                provider: self.provider,
            })?;

        let answer = Answer {
            text: content,
            model: chat_resp.model.unwrap_or_else(|| self.model.clone()),
            tokens_used: chat_resp.usage.map(|u| u.total_tokens),
            latency_ms: start.elapsed().as_millis() as u64,
        };
        tracing::debug!(
            "{} answered with {} in {}ms (tokens: {:?})",
            self.provider,
            answer.model,
            answer.latency_ms,
            answer.tokens_used
        );
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn image() -> EncodedImage {
        EncodedImage::from_base64("/9j/AAAA")
    }

    fn answerer_for(server: &mockito::Server) -> OpenAiAnswerer {
        OpenAiAnswerer::with_endpoint(&format!("{}/v1", server.url()), "sk-test", "gpt-4o-mini")
            .with_max_tokens(Some(300))
    }

    #[tokio::test]
    async fn test_sends_two_part_user_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "model": "gpt-4o-mini",
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "What color is this?"},
                        {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,/9j/AAAA"}}
                    ]
                }],
                "max_tokens": 300
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"Red"}}],"model":"gpt-4o-mini-2024-07-18","usage":{"total_tokens":42}}"#)
            .expect(1)
            .create_async()
            .await;

        let answer = answerer_for(&server)
            .answer(&image(), "What color is this?")
            .await
            .unwrap();

        assert_eq!(answer.text, "Red");
        assert_eq!(answer.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(answer.tokens_used, Some(42));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_model_falls_back_to_configured() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"Red"}}]}"#)
            .create_async()
            .await;

        let answer = answerer_for(&server)
            .answer(&image(), "q")
            .await
            .unwrap();
        assert_eq!(answer.model, "gpt-4o-mini");
        assert_eq!(answer.tokens_used, None);
    }

    #[tokio::test]
    async fn test_http_error_keeps_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let err = answerer_for(&server)
            .answer(&image(), "q")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        assert!(err.to_string().contains("Incorrect API key"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let err = answerer_for(&server)
            .answer(&image(), "q")
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_null_content_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":null}}]}"#)
            .create_async()
            .await;

        let err = answerer_for(&server)
            .answer(&image(), "q")
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn test_answer_text_returns_sentinel_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let text = answerer_for(&server)
            .answer_text(&image(), "q")
            .await;
        assert_eq!(text, "Error");
    }

    #[tokio::test]
    async fn test_unreachable_host_returns_sentinel() {
        // Nothing listens on port 9 (discard) in test environments.
        let answerer = OpenAiAnswerer::with_endpoint("http://127.0.0.1:9/v1", "sk-test", "m")
            .with_timeout(Some(Duration::from_secs(2)));
        assert_eq!(answerer.answer_text(&image(), "q").await, "Error");
    }

    #[test]
    fn test_omits_max_tokens_when_unset() {
        let answerer = OpenAiAnswerer::new("sk-test", "gpt-4o-mini");
        let body = serde_json::to_value(answerer.request_body(&image(), "q")).unwrap();
        assert!(body.get("max_tokens").is_none());
        assert_eq!(body["messages"][0]["content"][0]["type"], "text");
        assert_eq!(body["messages"][0]["content"][1]["type"], "image_url");
    }

    #[test]
    fn test_endpoint_trailing_slash() {
        let answerer = OpenAiAnswerer::with_endpoint("https://example.test/v1/", "k", "m");
        assert_eq!(answerer.url, "https://example.test/v1/chat/completions");
    }
}
