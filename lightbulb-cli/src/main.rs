//! # lightbulb CLI
//!
//! Command-line interface for the lightbulb document pipeline.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lightbulb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "lightbulb.yml")]
    config: PathBuf,

    /// Project root (defaults to the config file's directory)
    #[arg(long)]
    project: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Stop at the first document that fails
    #[arg(long)]
    fail_fast: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every source document into the build folder
    Build,

    /// Upsert every source document into the store
    Load,

    /// List source files changed since a git ref
    Changes {
        /// Git ref to diff against (e.g., HEAD~1 or origin/main)
        #[arg(long, default_value = "HEAD~1")]
        since: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Read or update the "last updated" watermark
    Watermark {
        #[command(subcommand)]
        command: WatermarkCommands,
    },
}

#[derive(Subcommand)]
enum WatermarkCommands {
    /// Print the stored watermark
    Get,

    /// Store a new watermark
    Set {
        /// RFC 3339 timestamp (defaults to now)
        timestamp: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = commands::load_config(&cli.config, cli.project.as_deref(), cli.fail_fast)?;

    match cli.command {
        Commands::Build => commands::build(config),
        Commands::Load => commands::load(config),
        Commands::Changes { since, json } => commands::changes(config, &since, json),
        Commands::Watermark { command } => match command {
            WatermarkCommands::Get => commands::watermark_get(config),
            WatermarkCommands::Set { timestamp } => {
                commands::watermark_set(config, timestamp.as_deref())
            }
        },
    }
}
