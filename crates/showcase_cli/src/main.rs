//! Showcase CLI - server and maintenance tool for the portfolio back-office.

mod commands;
mod config;
#[cfg(feature = "server")]
mod shutdown;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showcase")]
#[command(version)]
#[command(about = "Portfolio back-office: archive ingestion and GitHub sync")]
#[command(
    long_about = "Showcase keeps a portfolio of projects in a database. Projects are uploaded \
as ZIP archives, which are extracted and analyzed for the technologies they use, or synced \
from a GitHub account. The HTTP API serves the public portfolio and the admin back-office."
)]
#[command(after_long_help = r#"EXAMPLES
    Start the HTTP server:
        $ showcase serve

    Sync repositories of the configured GitHub account:
        $ showcase sync

    Re-run analysis for every uploaded project:
        $ showcase reanalyze

CONFIGURATION
    Showcase reads configuration from:
      1. ~/.config/showcase/config.toml (or $XDG_CONFIG_HOME/showcase/config.toml)
      2. ./showcase.toml
      3. Environment variables (SHOWCASE_ prefix, __ between section and key)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    SHOWCASE_DATABASE__URL        Database connection string (default: ~/.local/state/showcase/showcase.db)
    SHOWCASE_SERVER__BIND         Listen address (default: 127.0.0.1:3000)
    SHOWCASE_STORAGE__UPLOADS_DIR Upload directory (default: ~/.local/share/showcase/uploads)
    SHOWCASE_GITHUB__USERNAME     GitHub account to sync
    SHOWCASE_GITHUB__TOKEN        GitHub personal access token
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    #[cfg(feature = "server")]
    Serve,
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Sync repositories of the configured GitHub account
    #[cfg(feature = "github")]
    Sync,
    /// Re-analyze every uploaded project from its stored archive
    Reanalyze,
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Drop all tables and reapply migrations
    Fresh {
        /// Confirm that every project will be deleted
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("showcase=info,showcase_cli=info,tower_http=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    // Load configuration (config file -> env vars -> defaults)
    let config = config::Config::load();

    let cli = Cli::parse();

    let database_url = config
        .database_url()
        .ok_or("Cannot determine a database URL; set SHOWCASE_DATABASE__URL")?;

    // Ensure the database directory exists for SQLite
    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g., ?mode=rwc) before path operations
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        let db_path = std::path::Path::new(db_path);

        if db_path.is_relative() && !db_path.as_os_str().is_empty() {
            tracing::warn!(
                "Database path '{}' is relative - behavior depends on current directory. \
                 Consider using an absolute path.",
                db_path.display()
            );
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
    }

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve => {
            commands::serve::handle_serve(&config, &database_url).await?;
        }
        Commands::Migrate { action } => {
            commands::migrate::handle_migrate(action, &database_url).await?;
        }
        #[cfg(feature = "github")]
        Commands::Sync => {
            commands::sync::handle_sync(&config, &database_url).await?;
        }
        Commands::Reanalyze => {
            commands::reanalyze::handle_reanalyze(&config, &database_url).await?;
        }
    }

    Ok(())
}
