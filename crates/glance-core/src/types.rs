//! Core data types shared by the backends, the session and the front end.

use crate::error::VisionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text shown in place of an answer when a backend call fails.
pub const ERROR_SENTINEL: &str = "Error";

/// Question asked when the user doesn't type one.
pub const DEFAULT_QUESTION: &str = "Analyze this advertising campaign";

/// Which vision backend answers a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelSelection {
    /// Llama 3.2 11B Vision, served by Groq
    #[default]
    #[serde(rename = "llama")]
    LlamaVision,

    /// GPT-4o mini, served by OpenAI
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
}

impl ModelSelection {
    /// Both selectable models, in menu order.
    pub const ALL: [ModelSelection; 2] = [ModelSelection::LlamaVision, ModelSelection::Gpt4oMini];

    /// Human-readable label for menus.
    pub fn label(&self) -> &'static str {
        match self {
            ModelSelection::LlamaVision => "Llama 3.2 Vision (Groq)",
            ModelSelection::Gpt4oMini => "GPT-4o mini (OpenAI)",
        }
    }

    /// Short identifier used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSelection::LlamaVision => "llama",
            ModelSelection::Gpt4oMini => "gpt-4o-mini",
        }
    }
}

impl fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "llama" | "llama-vision" => Ok(ModelSelection::LlamaVision),
            "gpt-4o-mini" | "gpt4o-mini" | "gpt" => Ok(ModelSelection::Gpt4oMini),
            other => Err(format!("unknown model '{other}' (expected llama or gpt-4o-mini)")),
        }
    }
}

/// A successful reply from a vision backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Generated answer text
    pub text: String,
    /// Model identifier reported by the backend
    pub model: String,
    /// Number of tokens used (input + output), if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// The outcome of one submission, ready to display.
///
/// Failures keep their cause for logging, but render as [`ERROR_SENTINEL`].
#[derive(Debug)]
pub enum AnswerText {
    Answered(Answer),
    Failed(VisionError),
}

impl AnswerText {
    /// The text to show the user: the answer, or exactly `"Error"`.
    pub fn as_str(&self) -> &str {
        match self {
            AnswerText::Answered(answer) => &answer.text,
            AnswerText::Failed(_) => ERROR_SENTINEL,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AnswerText::Failed(_))
    }
}

impl From<Result<Answer, VisionError>> for AnswerText {
    fn from(result: Result<Answer, VisionError>) -> Self {
        match result {
            Ok(answer) => AnswerText::Answered(answer),
            Err(e) => AnswerText::Failed(e),
        }
    }
}

impl fmt::Display for AnswerText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
