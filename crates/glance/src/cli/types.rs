//! CLI enum types: model choice and answer output format.

use clap::ValueEnum;
use glance_core::ModelSelection;

/// Selectable vision models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Model {
    /// Llama 3.2 11B Vision on Groq
    Llama,
    /// GPT-4o mini on OpenAI
    #[value(name = "gpt-4o-mini", alias = "gpt")]
    Gpt4oMini,
}

impl From<Model> for ModelSelection {
    fn from(model: Model) -> Self {
        match model {
            Model::Llama => ModelSelection::LlamaVision,
            Model::Gpt4oMini => ModelSelection::Gpt4oMini,
        }
    }
}

/// How the answer is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AnswerFormat {
    /// The answer text only ("Error" on failure)
    #[default]
    Text,
    /// A JSON object with model, question, answer and timing
    Json,
}

impl std::fmt::Display for AnswerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerFormat::Text => write!(f, "text"),
            AnswerFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_maps_to_selection() {
        assert_eq!(ModelSelection::from(Model::Llama), ModelSelection::LlamaVision);
        assert_eq!(ModelSelection::from(Model::Gpt4oMini), ModelSelection::Gpt4oMini);
    }

    #[test]
    fn model_value_names() {
        assert_eq!(Model::from_str("llama", true).unwrap(), Model::Llama);
        assert_eq!(Model::from_str("gpt-4o-mini", true).unwrap(), Model::Gpt4oMini);
        assert_eq!(Model::from_str("gpt", true).unwrap(), Model::Gpt4oMini);
    }
}
