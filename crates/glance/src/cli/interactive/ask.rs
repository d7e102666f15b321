//! Guided question flow.
//!
//! Walks the user through: API key check → image path → question →
//! analysis → answer, then offers to ask again about the same image.

use console::Style;
use dialoguer::{Input, Select};
use glance_core::{Config, Glance, ImageUpload, ModelSelection};
use std::path::PathBuf;

use super::theme::glance_theme;
use crate::cli::ask::submit_with_spinner;

/// Walk the user through asking about one image.
pub async fn guided_ask(config: &mut Config, model: ModelSelection) -> anyhow::Result<()> {
    let theme = glance_theme();
    let dim = Style::new().for_stderr().dim();
    let warn = Style::new().for_stderr().yellow();

    // ── Step 1: API key ─────────────────────────────────────────────────────

    if !super::setup::ensure_api_key(config, model)? {
        eprintln!(
            "  {}",
            warn.apply_to("No API key — answers from this model will show as Error.")
        );
    }

    let glance = Glance::new(config.clone());
    let mut session = glance.session();
    session.select_model(model);

    'image: loop {
        // ── Step 2: Image ───────────────────────────────────────────────────

        let Some(upload) = prompt_image(config)? else {
            return Ok(());
        };
        eprintln!(
            "  {}",
            dim.apply_to(format!(
                "Loaded {} ({}x{})",
                upload.name(),
                upload.width(),
                upload.height()
            ))
        );
        session.set_image(upload.into_image());

        loop {
            // ── Step 3: Question ────────────────────────────────────────────

            let Some(question) = super::handle_interrupt(
                Input::<String>::with_theme(&theme)
                    .with_prompt("Question")
                    .default(session.question().to_string())
                    .interact_text(),
            )?
            else {
                return Ok(());
            };
            if !question.trim().is_empty() {
                session.set_question(question);
            }

            // ── Step 4: Ask ─────────────────────────────────────────────────

            if let Some(answer) = submit_with_spinner(&glance, &session).await? {
                print_answer(model, &answer);
            }

            // ── Post-answer menu ────────────────────────────────────────────

            let post_items = &[
                "Ask another question about this image",
                "Use a different image",
                "Back to main menu",
            ];
            let post_choice = Select::with_theme(&theme)
                .with_prompt("What next?")
                .items(post_items)
                .default(0)
                .interact_opt()?;

            match post_choice {
                Some(0) => continue,
                Some(1) => {
                    session.clear_image();
                    continue 'image;
                }
                _ => return Ok(()),
            }
        }
    }
}

/// Prompt until a readable jpg/png is given. `Ok(None)` on interrupt.
fn prompt_image(config: &Config) -> anyhow::Result<Option<ImageUpload>> {
    let theme = glance_theme();
    let warn = Style::new().for_stderr().yellow();
    let formats = config.upload.supported_formats.join(", ");

    loop {
        let Some(raw_path) = super::handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt(format!("Image file ({formats})"))
                .interact_text(),
        )?
        else {
            return Ok(None);
        };

        let path = PathBuf::from(shellexpand::tilde(raw_path.trim()).into_owned());

        match ImageUpload::from_path(&path, &config.upload) {
            Ok(upload) => return Ok(Some(upload)),
            Err(e) => {
                eprintln!("  {}", warn.apply_to(e.to_string()));
                continue;
            }
        }
    }
}

/// Print the answer under a heading. The answer itself goes to stdout.
fn print_answer(model: ModelSelection, answer: &glance_core::AnswerText) {
    let bold = Style::new().for_stderr().bold();
    let err = Style::new().for_stderr().red();

    eprintln!();
    eprintln!("  {}", bold.apply_to(format!("Answer from {}", model.label())));
    eprintln!();
    if answer.is_error() {
        eprintln!("  {} {}", err.apply_to("✗"), err.apply_to("The request failed."));
    }
    println!("{answer}");
    eprintln!();
}
