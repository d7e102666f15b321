//! Prompt theme and start-up banner for the guided mode.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;
use glance_core::ModelSelection;

/// Magenta prompts, yellow selection marker.
pub fn glance_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("◉".to_string()).for_stderr().magenta(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("»".to_string()).for_stderr().dim(),
        active_item_prefix: style("→".to_string()).for_stderr().yellow(),
        active_item_style: Style::new().for_stderr().yellow().bold(),
        inactive_item_prefix: style(" ".to_string()).for_stderr(),
        success_prefix: style("◉".to_string()).for_stderr().green(),
        success_suffix: style("=".to_string()).for_stderr().dim(),
        error_prefix: style("!".to_string()).for_stderr().red().bold(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().magenta(),
        ..ColorfulTheme::default()
    }
}

/// Banner text: name and version, then one line per selectable model.
fn banner_lines() -> Vec<String> {
    let mut lines = vec![format!("glance {}", glance_core::VERSION)];
    lines.extend(ModelSelection::ALL.iter().map(|m| format!("  · {}", m.label())));
    lines
}

/// Prints the banner to stderr; stdout carries only answers.
pub fn print_banner() {
    let accent = Style::new().for_stderr().magenta().bold();
    let dim = Style::new().for_stderr().dim();

    let mut lines = banner_lines().into_iter();
    eprintln!();
    if let Some(title) = lines.next() {
        eprintln!("  {}", accent.apply_to(title));
    }
    for line in lines {
        eprintln!("  {}", dim.apply_to(line));
    }
    eprintln!();
}
