//! The `glance ask` command: one image, one question, one answer.

use clap::Args;
use glance_core::{AnswerText, Config, Glance, ModelSelection, Session};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use super::types::{AnswerFormat, Model};

/// Arguments for the `ask` command.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Image file to analyze (jpg or png)
    #[arg(required = true)]
    pub image: PathBuf,

    /// Vision model to ask (defaults to session.default_model)
    #[arg(short, long, value_enum)]
    pub model: Option<Model>,

    /// Question about the image (defaults to session.default_question)
    #[arg(short, long)]
    pub question: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: AnswerFormat,
}

/// JSON shape printed by `--format json`.
#[derive(Serialize)]
struct AskOutput<'a> {
    image: String,
    model: ModelSelection,
    question: &'a str,
    answer: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens_used: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> AskOutput<'a> {
    fn new(image: &std::path::Path, session: &'a Session, answer: &'a AnswerText) -> Self {
        let (latency_ms, tokens_used, error) = match answer {
            AnswerText::Answered(a) => (Some(a.latency_ms), a.tokens_used, None),
            AnswerText::Failed(e) => (None, None, Some(e.to_string())),
        };
        Self {
            image: image.display().to_string(),
            model: session.model(),
            question: session.question(),
            answer: answer.as_str(),
            latency_ms,
            tokens_used,
            error,
        }
    }
}

/// Execute the ask command.
///
/// A backend failure still prints an answer (`Error`) and exits 0; only
/// problems with the image itself are reported as command errors.
pub async fn execute(args: AskArgs, config: Config) -> anyhow::Result<()> {
    if let Some(ref q) = args.question {
        if q.trim().is_empty() {
            anyhow::bail!("--question must not be empty");
        }
    }

    let glance = Glance::new(config);
    let upload = glance.load_image(&args.image)?;
    tracing::debug!(
        "Loaded {} ({}x{})",
        upload.name(),
        upload.width(),
        upload.height()
    );

    let mut session = glance.session();
    if let Some(model) = args.model {
        session.select_model(model.into());
    }
    if let Some(question) = args.question {
        session.set_question(question);
    }
    session.set_image(upload.into_image());

    let Some(answer) = submit_with_spinner(&glance, &session).await? else {
        anyhow::bail!("No image to submit");
    };

    match args.format {
        AnswerFormat::Text => println!("{answer}"),
        AnswerFormat::Json => {
            let output = AskOutput::new(&args.image, &session, &answer);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Submit a session while showing an "Analyzing..." spinner on stderr.
pub(crate) async fn submit_with_spinner(
    glance: &Glance,
    session: &Session,
) -> anyhow::Result<Option<AnswerText>> {
    if session.image().is_none() {
        return Ok(None);
    }

    let spinner = create_spinner(session.model());
    let result = glance.submit(session).await;
    spinner.finish_and_clear();

    Ok(result?)
}

fn create_spinner(model: ModelSelection) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Analyzing with {}...", model.label()));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use glance_core::{Answer, VisionError};

    fn session_with(model: ModelSelection, question: &str) -> Session {
        let mut session = Session::new(&Config::default());
        session.select_model(model);
        session.set_question(question);
        session
    }

    #[test]
    fn json_output_for_answer() {
        let session = session_with(ModelSelection::Gpt4oMini, "What color is this?");
        let answer = AnswerText::Answered(Answer {
            text: "Red".to_string(),
            model: "gpt-4o-mini".to_string(),
            tokens_used: Some(12),
            latency_ms: 340,
        });

        let output = AskOutput::new(std::path::Path::new("red.jpg"), &session, &answer);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["answer"], "Red");
        assert_eq!(json["latency_ms"], 340);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn json_output_for_failure_keeps_sentinel() {
        let session = session_with(ModelSelection::LlamaVision, "q");
        let answer = AnswerText::Failed(VisionError::EmptyResponse { provider: "Groq" });

        let output = AskOutput::new(std::path::Path::new("ad.png"), &session, &answer);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["answer"], "Error");
        assert_eq!(json["error"], "Groq returned no content");
        assert!(json.get("latency_ms").is_none());
    }

    #[tokio::test]
    async fn spinner_submit_skips_without_image() {
        let glance = Glance::with_answerers(Config::default(), glance_core::Answerers::new());
        let session = glance.session();
        assert!(submit_with_spinner(&glance, &session).await.unwrap().is_none());
    }
}
