//! # crmd CLI
//!
//! The `crmd` binary wires configuration to the storage layer and the
//! HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! crmd --config ./config/crmd.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `crmd init` | Create the SQLite database and schema |
//! | `crmd serve` | Start the JSON HTTP server |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crmd::{config, db, migrate, server};

/// crmd — a minimal contact-relationship-management backend.
#[derive(Parser)]
#[command(
    name = "crmd",
    about = "crmd — a minimal contact-relationship-management backend over SQLite",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/crmd.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and all four tables (contacts,
    /// interactions, ai_notes, followups). Idempotent — running it
    /// multiple times is safe, as is `POST /setup` on a running server.
    Init,

    /// Start the JSON HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves the
    /// CRM endpoints until the process is terminated.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&cfg).await?;
            migrate::run_migrations(&pool).await?;
            pool.close().await;
            println!("Database initialized successfully.");
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
