//! Migrate command - applies pending PostgreSQL schema migrations

use serde_json::json;
use tracing::info;

use crate::infrastructure::storage::{run_schema_migrations, PostgresMigrator};

use super::{load_config, print_json};

pub async fn run() -> anyhow::Result<()> {
    let config = load_config()?;
    let pool = crate::connect_postgres(&config).await?;

    let applied = run_schema_migrations(&pool).await?;
    let version = PostgresMigrator::new(pool).current_version().await?;

    info!(applied, ?version, "Migrations complete");
    print_json(&json!({
        "applied": applied,
        "version": version,
    }))
}
