//! Glance CLI - ask a vision-language model about an image.
//!
//! Glance encodes an image, sends it with a question to Llama 3.2 Vision
//! (Groq) or GPT-4o mini (OpenAI), and prints the answer.
//!
//! # Usage
//!
//! ```bash
//! # Guided mode (bare invocation on a terminal)
//! glance
//!
//! # Ask about a single image
//! glance ask ad.png --model gpt-4o-mini --question "Who is the target audience?"
//!
//! # View configuration
//! glance config show
//! ```

use clap::{CommandFactory, Parser, Subcommand};

mod cli;
mod logging;

/// Glance - ask a vision-language model about an image.
#[derive(Parser, Debug)]
#[command(name = "glance")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question about an image
    Ask(cli::ask::AskArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match glance_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `glance config path`."
            );
            glance_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Glance v{}", glance_core::VERSION);

    match cli.command {
        Some(Commands::Ask(args)) => cli::ask::execute(args, config).await,
        Some(Commands::Config(args)) => cli::config::execute(args).await,
        None if console::user_attended() => cli::interactive::run(config).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
