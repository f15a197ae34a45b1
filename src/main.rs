//! # Statikum Assistant CLI (`statikum`)
//!
//! The `statikum` binary serves the demo question-answering API and offers
//! offline access to the catalog from the command line.
//!
//! ## Usage
//!
//! ```bash
//! statikum --config ./config/statikum.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `statikum serve` | Start the HTTP API server |
//! | `statikum ask "<question>"` | Resolve a question through the LLM |
//! | `statikum ask --local "<question>"` | Match against prepared answers offline |
//! | `statikum catalog` | Show catalog collection counts |
//! | `statikum sources` | List external sources and their locations |
//!
//! ## Examples
//!
//! ```bash
//! # Start the API server
//! statikum serve --config ./config/statikum.toml
//!
//! # Ask the model (requires OPENAI_API_KEY)
//! statikum ask "Jaké byly finanční výsledky Klienta X?"
//!
//! # Offline canned answer
//! statikum ask --local "Jaké byly finanční výsledky Klienta X?"
//! ```

use clap::{Parser, Subcommand};
use statikum_assistant::{ask, catalog::Catalog, config, server, sources};
use std::path::PathBuf;

/// Statikum Assistant CLI — a demo question-answering service over the
/// Statikum financial/legal document catalog.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/statikum.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "statikum",
    about = "Statikum Assistant — question answering over a fixed financial/legal document catalog",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/statikum.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    ///
    /// Binds to the address configured in `[server].bind` and serves the
    /// ask, catalog, and sync-placeholder endpoints.
    Serve,

    /// Ask a question.
    ///
    /// By default the question is resolved through the configured LLM
    /// provider. With `--local` the question is matched against the
    /// prepared-answer catalog without any network call.
    Ask {
        /// The question text.
        question: String,

        /// Use the offline canned-answer path instead of the LLM.
        #[arg(long)]
        local: bool,
    },

    /// Show catalog collection counts.
    Catalog,

    /// List external sources and their locations.
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;
    let catalog = Catalog::load(&cfg)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg, catalog).await?;
        }
        Commands::Ask { question, local } => {
            if local {
                ask::run_ask_local(&catalog, &question)?;
            } else {
                ask::run_ask(&cfg, &catalog, &question).await?;
            }
        }
        Commands::Catalog => {
            println!("documents:        {}", catalog.documents.len());
            println!("metrics:          {}", catalog.metrics.len());
            println!("answers:          {}", catalog.answers.len());
            println!("external sources: {}", catalog.external_sources.len());
        }
        Commands::Sources => {
            sources::list_sources(&catalog)?;
        }
    }

    Ok(())
}
