//! Interactive CLI mode — guided experience for bare `glance` invocation.
//!
//! A menu-driven stand-in for a web page: pick a model (kept for the whole
//! session), pick an image, edit the question, ask, read the answer.

pub mod ask;
pub mod setup;
pub mod theme;

use console::Style;
use dialoguer::Select;
use glance_core::{Config, ModelSelection};

use super::config::key_status;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Entry point for interactive mode.
pub async fn run(mut config: Config) -> anyhow::Result<()> {
    theme::print_banner();

    let theme = theme::glance_theme();
    let mut model = config.session.default_model;

    loop {
        let items = [
            "Ask about an image".to_string(),
            format!("Change model (current: {})", model.label()),
            "Configure settings".to_string(),
            "Exit".to_string(),
        ];

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&items)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => ask::guided_ask(&mut config, model).await?,
            Some(1) => {
                if let Some(chosen) = select_model(model)? {
                    model = chosen;
                }
            }
            Some(2) => show_config(&config)?,
            Some(3) | None => break, // Exit or Ctrl+C / Esc
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// Model picker. Returns `None` on Esc.
fn select_model(current: ModelSelection) -> anyhow::Result<Option<ModelSelection>> {
    let theme = theme::glance_theme();
    let labels: Vec<&str> = ModelSelection::ALL.iter().map(|m| m.label()).collect();
    let default = ModelSelection::ALL
        .iter()
        .position(|m| *m == current)
        .unwrap_or(0);

    let choice = Select::with_theme(&theme)
        .with_prompt("Model")
        .items(&labels)
        .default(default)
        .interact_opt()?;

    Ok(choice.map(|i| ModelSelection::ALL[i]))
}

/// Interactive config viewer — shows a summary of current settings and offers
/// to display the full TOML or the config file path.
fn show_config(config: &Config) -> anyhow::Result<()> {
    let theme = theme::glance_theme();
    let dim = Style::new().for_stderr().dim();
    let cyan = Style::new().for_stderr().cyan();
    let label = Style::new().for_stderr().bold();

    loop {
        eprintln!();
        eprintln!("  {}", cyan.apply_to("Current configuration:"));
        eprintln!();

        let config_path = Config::default_path();
        let path_note = if config_path.exists() {
            "(exists)"
        } else {
            "(using defaults)"
        };

        eprintln!(
            "    {:<20} {} {}",
            label.apply_to("Config file:"),
            config_path.display(),
            dim.apply_to(path_note)
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Default model:"),
            config.session.default_model.label()
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Default question:"),
            config.session.default_question
        );
        eprintln!(
            "    {:<20} {} (quality {})",
            label.apply_to("Encoding:"),
            "JPEG",
            config.encoder.jpeg_quality
        );
        eprintln!(
            "    {:<20} {} (max {} MB)",
            label.apply_to("Accepted files:"),
            config.upload.supported_formats.join(", "),
            config.upload.max_file_size_mb
        );
        for model in ModelSelection::ALL {
            eprintln!("    {:<20} {}", "", key_status(config, model));
        }
        eprintln!();

        let items = &["View full config (TOML)", "Show config file path", "Back"];

        let selection = Select::with_theme(&theme)
            .with_prompt("Configuration")
            .items(items)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => match super::config::masked(config).to_toml() {
                Ok(toml) => {
                    eprintln!();
                    eprintln!("{}", dim.apply_to("─".repeat(50)));
                    eprintln!("{toml}");
                    eprintln!("{}", dim.apply_to("─".repeat(50)));
                    eprintln!();
                }
                Err(e) => {
                    let err = Style::new().for_stderr().red();
                    eprintln!("  {} Failed to serialize config: {e}", err.apply_to("✗"));
                    eprintln!();
                }
            },
            Some(1) => {
                eprintln!();
                eprintln!("  {}", Config::default_path().display());
                eprintln!();
            }
            Some(2) | None => break, // Back or Esc / Ctrl+C
            _ => unreachable!(),
        }
    }

    Ok(())
}
