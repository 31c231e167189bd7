//! `kit` -- CLI binary for the kitbox kit system.
//!
//! Provides the following subcommands:
//!
//! - `kit list` -- Show bundled kits and whether they are enabled.
//! - `kit show` -- Show one kit's metadata and commands.
//! - `kit enable` / `kit disable` -- Persistently toggle a kit.
//! - `kit run` -- Dispatch a single slash-command line.
//! - `kit repl` -- Interactive slash-command session.

use clap::{Parser, Subcommand};

mod commands;
mod kits;

/// kitbox slash-command kits CLI.
#[derive(Parser)]
#[command(name = "kit", about = "kitbox slash-command kits CLI", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List kits and their enablement.
    List {
        /// Kits file path (overrides auto-discovery).
        #[arg(long)]
        kits_file: Option<String>,
    },

    /// Show a kit's details.
    Show {
        /// Kit id.
        id: String,

        /// Kits file path (overrides auto-discovery).
        #[arg(long)]
        kits_file: Option<String>,
    },

    /// Enable a kit (persisted).
    Enable {
        /// Kit id.
        id: String,

        /// Kits file path (overrides auto-discovery).
        #[arg(long)]
        kits_file: Option<String>,
    },

    /// Disable a kit (persisted).
    Disable {
        /// Kit id.
        id: String,

        /// Kits file path (overrides auto-discovery).
        #[arg(long)]
        kits_file: Option<String>,
    },

    /// Dispatch one slash-command line.
    Run(commands::run::RunArgs),

    /// Start an interactive slash-command session.
    Repl(commands::repl::ReplArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match cli.command {
        Commands::List { kits_file } => {
            let registry = commands::open_registry(kits_file.as_deref()).await?;
            commands::kits_cmd::kits_list(&registry);
        }
        Commands::Show { id, kits_file } => {
            let registry = commands::open_registry(kits_file.as_deref()).await?;
            commands::kits_cmd::kits_show(&registry, &id)?;
        }
        Commands::Enable { id, kits_file } => {
            let registry = commands::open_registry(kits_file.as_deref()).await?;
            commands::kits_cmd::kits_enable(&registry, &id).await?;
        }
        Commands::Disable { id, kits_file } => {
            let registry = commands::open_registry(kits_file.as_deref()).await?;
            commands::kits_cmd::kits_disable(&registry, &id).await?;
        }
        Commands::Run(args) => commands::run::run(args).await?,
        Commands::Repl(args) => commands::repl::run(args).await?,
    }

    Ok(())
}
