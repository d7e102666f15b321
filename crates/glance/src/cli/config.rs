//! The `glance config` command for configuration management.

use clap::{Args, Subcommand};
use glance_core::vision::{env_var_for, provider_label, resolve_env_var};
use glance_core::{Config, ModelSelection};
use std::path::Path;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration (API keys masked)
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("{}", masked(&config).to_toml()?);
            for model in ModelSelection::ALL {
                println!("# {}", key_status(&config, model));
            }
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();
            init_config(&path, force)?;
            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Write a default config file, refusing to overwrite unless `force`.
fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = Config::default().to_toml()?;
    std::fs::write(path, toml)?;
    Ok(())
}

/// Copy of the config with literal API keys replaced by a mask.
///
/// `${ENV_VAR}` references are kept as-is since they hold no secret.
pub(crate) fn masked(config: &Config) -> Config {
    let mut shown = config.clone();
    for model in ModelSelection::ALL {
        let key = shown.backends.for_model(model).api_key;
        if !key.is_empty() && !key.starts_with("${") {
            let mask = mask_key(key);
            shown.backends.set_api_key(model, &mask);
        }
    }
    shown
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{visible}…")
}

/// One-line description of where a backend's key comes from.
pub(crate) fn key_status(config: &Config, model: ModelSelection) -> String {
    let configured = config.backends.for_model(model).api_key;
    let label = provider_label(model);
    match resolve_env_var(configured) {
        Some(_) if configured.starts_with("${") => {
            format!("{label} API key: from {}", &configured[2..configured.len() - 1])
        }
        Some(_) => format!("{label} API key: set in config"),
        None => format!("{label} API key: not set ({})", env_var_for(model)),
    }
}
