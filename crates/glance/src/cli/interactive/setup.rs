//! API key setup — detection, input, and optional persistence.

use console::Style;
use dialoguer::{Password, Select};
use glance_core::vision::{env_var_for, provider_label, resolve_env_var};
use glance_core::{Config, ModelSelection};
use std::path::Path;

use super::theme::glance_theme;

/// Make sure the backend serving `model` has an API key.
///
/// Uses the configured key (or its `${ENV_VAR}`) when present. Otherwise
/// prompts for one, optionally saves it to the config file, and stores it
/// in `config` for this session. Returns `false` if the user skips.
pub fn ensure_api_key(config: &mut Config, model: ModelSelection) -> anyhow::Result<bool> {
    if config_has_key(config, model) {
        return Ok(true);
    }

    let theme = glance_theme();
    let warn = Style::new().for_stderr().yellow();
    let env_var = env_var_for(model);

    eprintln!("  {}", warn.apply_to(format!("{env_var} not set.")));

    let key: String = match Password::with_theme(&theme)
        .with_prompt(format!(
            "Enter your {} API key (Esc to skip)",
            provider_label(model)
        ))
        .allow_empty_password(true)
        .interact()
    {
        Ok(k) if !k.is_empty() => k,
        _ => return Ok(false), // Empty or error → skip
    };

    let save_options = &["Yes, save to config file", "No, use for this session only"];
    let save_choice = Select::with_theme(&theme)
        .with_prompt("Save this key for future sessions?")
        .items(save_options)
        .default(0)
        .interact_opt()?;

    match save_choice {
        Some(0) => {
            let config_path = Config::default_path();
            match save_key_to_config(&config_path, model, &key) {
                Ok(()) => {
                    let dim = Style::new().for_stderr().dim();
                    eprintln!(
                        "  {}",
                        dim.apply_to(format!("Key saved to {}", config_path.display()))
                    );
                }
                Err(e) => {
                    eprintln!(
                        "  {}",
                        warn.apply_to(format!("Could not save to config: {e}"))
                    );
                    eprintln!("  Using key for this session only.");
                }
            }
        }
        Some(1) => {}
        _ => return Ok(false), // Cancelled / Esc
    }

    config.backends.set_api_key(model, &key);
    Ok(true)
}

/// Check if the config (or the environment it points at) yields a key.
pub(crate) fn config_has_key(config: &Config, model: ModelSelection) -> bool {
    resolve_env_var(config.backends.for_model(model).api_key).is_some()
}

/// Section name under `[backends]` for a model's provider.
fn section_for(model: ModelSelection) -> &'static str {
    match model {
        ModelSelection::LlamaVision => "groq",
        ModelSelection::Gpt4oMini => "openai",
    }
}

/// Save an API key to the config file, preserving existing comments.
fn save_key_to_config(config_path: &Path, model: ModelSelection, key: &str) -> anyhow::Result<()> {
    let content = if config_path.exists() {
        std::fs::read_to_string(config_path)?
    } else {
        String::new()
    };

    let mut doc: toml_edit::DocumentMut = content.parse()?;
    let section_name = section_for(model);

    // Ensure [backends] table exists
    if !doc.contains_key("backends") {
        let mut table = toml_edit::Table::new();
        table.set_implicit(true);
        doc["backends"] = toml_edit::Item::Table(table);
    }

    // Ensure [backends.<provider>] table exists
    if !doc["backends"]
        .as_table()
        .is_some_and(|t| t.contains_key(section_name))
    {
        doc["backends"][section_name] = toml_edit::Item::Table(toml_edit::Table::new());
    }

    doc["backends"][section_name]["api_key"] = toml_edit::value(key);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, doc.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── config_has_key tests ────────────────────────────────────────────

    #[test]
    fn config_has_key_with_real_key() {
        let mut config = Config::default();
        config.backends.openai.api_key = "sk-real-key-123".to_string();
        assert!(config_has_key(&config, ModelSelection::Gpt4oMini));
    }

    #[test]
    fn config_has_key_empty_key() {
        let mut config = Config::default();
        config.backends.groq.api_key = String::new();
        assert!(!config_has_key(&config, ModelSelection::LlamaVision));
    }

    #[test]
    fn config_has_key_unset_template() {
        let mut config = Config::default();
        config.backends.groq.api_key = "${GLANCE_SETUP_TEST_UNSET}".to_string();
        assert!(!config_has_key(&config, ModelSelection::LlamaVision));
    }

    // ── save_key_to_config tests ────────────────────────────────────────

    #[test]
    fn save_key_creates_file_and_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        save_key_to_config(&path, ModelSelection::Gpt4oMini, "sk-saved").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.backends.openai.api_key, "sk-saved");
        assert_eq!(config.backends.openai.model, "gpt-4o-mini");
    }

    #[test]
    fn save_key_preserves_comments_and_other_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "# my settings\n[session]\ndefault_question = \"Who is this ad for?\"\n",
        )
        .unwrap();

        save_key_to_config(&path, ModelSelection::LlamaVision, "gsk-saved").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# my settings"));
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.session.default_question, "Who is this ad for?");
        assert_eq!(config.backends.groq.api_key, "gsk-saved");
    }

    #[test]
    fn section_names() {
        assert_eq!(section_for(ModelSelection::LlamaVision), "groq");
        assert_eq!(section_for(ModelSelection::Gpt4oMini), "openai");
    }

    #[test]
    fn save_key_leaves_malformed_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let original = "# my notes\n[session]\ndefault_question = \"Who is this for?\"\n[encoder\njpeg_quality = 80\n";
        std::fs::write(&path, original).unwrap();

        let result = save_key_to_config(&path, ModelSelection::Gpt4oMini, "sk-new");

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}
