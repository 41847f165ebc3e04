//! Fitgate
//!
//! A fitness command gateway:
//! - Per-owner API keys stored as digests only
//! - An audited dispatcher for workout commands
//! - Popularity and per-owner statistics
//! - In-memory or PostgreSQL storage

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod state;

pub use crate::config::AppConfig;
pub use state::AppState;

use std::sync::Arc;
use std::time::Duration;

use crate::config::StorageBackend;
use domain::{
    api_key::ApiKeyRepository,
    audit::AuditRepository,
    owner::OwnerRepository,
    workout::{PlanRepository, SetRecordRepository},
};
use infrastructure::{
    api_key::{InMemoryApiKeyRepository, KeyGenerator, KeyStore, PostgresApiKeyRepository},
    audit::{AuditService, InMemoryAuditRepository, PostgresAuditRepository},
    observability::record_build_info,
    owner::{InMemoryOwnerRepository, OwnerService, PostgresOwnerRepository},
    services::{CommandService, DispatchService, StatsService},
    storage::{connect_pool, run_schema_migrations, PostgresConfig},
    workout::{
        InMemoryPlanRepository, InMemorySetRecordRepository, PostgresPlanRepository,
        PostgresSetRecordRepository,
    },
};
use tracing::info;

/// Shortest random part accepted for issued secrets
const MIN_KEY_BYTES: usize = 16;

/// One storage backend's repositories
struct Repositories {
    owners: Arc<dyn OwnerRepository>,
    keys: Arc<dyn ApiKeyRepository>,
    sets: Arc<dyn SetRecordRepository>,
    plans: Arc<dyn PlanRepository>,
    audit: Arc<dyn AuditRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            owners: Arc::new(InMemoryOwnerRepository::new()),
            keys: Arc::new(InMemoryApiKeyRepository::new()),
            sets: Arc::new(InMemorySetRecordRepository::new()),
            plans: Arc::new(InMemoryPlanRepository::new()),
            audit: Arc::new(InMemoryAuditRepository::new()),
        }
    }

    fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            owners: Arc::new(PostgresOwnerRepository::new(pool.clone())),
            keys: Arc::new(PostgresApiKeyRepository::new(pool.clone())),
            sets: Arc::new(PostgresSetRecordRepository::new(pool.clone())),
            plans: Arc::new(PostgresPlanRepository::new(pool.clone())),
            audit: Arc::new(PostgresAuditRepository::new(pool)),
        }
    }
}

/// Create the application state with default (in-memory) configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    if config.keys.key_bytes < MIN_KEY_BYTES {
        anyhow::bail!(
            "keys.key_bytes must be at least {}, got {}",
            MIN_KEY_BYTES,
            config.keys.key_bytes
        );
    }

    info!("Storage backend: {:?}", config.storage.backend);

    let repositories = match config.storage.backend {
        StorageBackend::Memory => Repositories::in_memory(),
        StorageBackend::Postgres => {
            let pool = connect_postgres(config).await?;
            let applied = run_schema_migrations(&pool).await?;
            info!(applied, "Schema migrations checked");
            Repositories::postgres(pool)
        }
    };

    record_build_info();
    Ok(build_state(config, repositories))
}

/// Open the configured PostgreSQL pool
pub async fn connect_postgres(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let url = config.storage.resolve_database_url().ok_or_else(|| {
        anyhow::anyhow!("storage.database_url or DATABASE_URL is required for the postgres backend")
    })?;

    let pool = connect_pool(
        &PostgresConfig::new(url).with_max_connections(config.storage.max_connections),
    )
    .await?;

    Ok(pool)
}

fn build_state(config: &AppConfig, repos: Repositories) -> AppState {
    let generator = KeyGenerator::new(config.keys.prefix.clone())
        .with_key_bytes(config.keys.key_bytes);
    let key_store = Arc::new(
        KeyStore::new(repos.keys.clone(), repos.owners.clone()).with_generator(generator),
    );

    let owner_service = Arc::new(OwnerService::new(
        repos.owners,
        repos.keys,
        repos.sets.clone(),
        repos.plans.clone(),
        repos.audit.clone(),
    ));

    let audit_service = Arc::new(
        AuditService::new(repos.audit)
            .with_timeout(Duration::from_millis(config.audit.timeout_ms)),
    );

    let command_service = Arc::new(CommandService::new(repos.sets.clone(), repos.plans));

    let dispatch_service = Arc::new(DispatchService::new(
        key_store.clone(),
        command_service,
        audit_service,
    ));

    let stats_service = Arc::new(
        StatsService::new(key_store.clone(), repos.sets)
            .with_window_days(config.stats.window_days)
            .with_tracked_lifts(&config.stats.tracked_lifts),
    );

    AppState {
        owner_service,
        key_store,
        dispatch_service,
        stats_service,
    }
}
