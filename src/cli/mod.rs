//! CLI module for fitgate
//!
//! Every subcommand builds the application state from configuration, runs
//! one operation and prints the result as pretty JSON on stdout.

pub mod invoke;
pub mod key;
pub mod migrate;
pub mod owner;
pub mod report;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::warn;

use crate::config::{AppConfig, StorageBackend};
use crate::infrastructure::logging;
use crate::AppState;

/// Fitgate - authenticated workout commands with audit trail and statistics
#[derive(Parser)]
#[command(name = "fitgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage owners
    #[command(subcommand)]
    Owner(owner::OwnerCommand),

    /// Manage API keys
    #[command(subcommand)]
    Key(key::KeyCommand),

    /// Invoke a command with an API key
    Invoke(invoke::InvokeArgs),

    /// Exercise popularity across all owners
    Popularity(report::KeyArgs),

    /// Statistics for the key's owner
    Stats(report::StatsArgs),

    /// Audit trail for the key's owner
    Audit(report::AuditArgs),

    /// Apply pending PostgreSQL migrations
    Migrate,
}

/// Load `.env` and configuration, then install the log subscriber
pub fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}

/// Load configuration and build the application state
pub async fn bootstrap() -> anyhow::Result<AppState> {
    let config = load_config()?;
    if let Some(notice) = ephemeral_backend_notice(&config) {
        warn!("{}", notice);
    }
    crate::create_app_state_with_config(&config).await
}

/// Warning for backends whose data is gone when the process exits
fn ephemeral_backend_notice(config: &AppConfig) -> Option<&'static str> {
    match config.storage.backend {
        StorageBackend::Memory => Some(
            "In-memory storage: owners, keys and sets are discarded on exit. \
             Set storage.backend = \"postgres\" (APP__STORAGE__BACKEND=postgres) to persist them",
        ),
        StorageBackend::Postgres => None,
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_is_flagged() {
        let config = AppConfig::default();
        let notice = ephemeral_backend_notice(&config).unwrap();
        assert!(notice.contains("postgres"));

        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Postgres;
        assert!(ephemeral_backend_notice(&config).is_none());
    }

    #[test]
    fn test_cli_parses_stats() {
        let cli = Cli::try_parse_from(["fitgate", "stats", "--key", "fg_live_x"]);
        assert!(cli.is_ok());
    }
}
