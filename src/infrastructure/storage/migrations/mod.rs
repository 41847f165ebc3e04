//! Versioned PostgreSQL schema migrations tracked in `_migrations`

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// A single schema migration
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub description: String,
    /// SQL applied on upgrade; may contain several statements
    pub up: String,
    /// SQL that undoes `up`
    pub down: String,
}

impl Migration {
    pub fn new(
        version: i64,
        description: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
            down: down.into(),
        }
    }
}

/// Applies and reverts migrations, recording them in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check migration status: {}", e)))
    }

    /// Apply one migration unless it already ran. Returns whether it ran.
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin migration: {}", e)))?;

        sqlx::raw_sql(&migration.up)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit migration: {}", e)))?;

        info!(version = migration.version, description = %migration.description, "Applied migration");
        Ok(true)
    }

    /// Revert one migration if it is applied. Returns whether it ran.
    pub async fn revert_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if !self.is_applied(migration.version).await? {
            return Ok(false);
        }

        sqlx::raw_sql(&migration.down)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to revert migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to remove migration record {}: {}",
                    migration.version, e
                ))
            })?;

        info!(version = migration.version, "Reverted migration");
        Ok(true)
    }

    /// The latest applied version, if any
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))
    }
}

/// The gateway schema, in application order
pub fn schema_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create owners table",
            r#"
            CREATE TABLE IF NOT EXISTS owners (
                id VARCHAR(64) PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
            "DROP TABLE IF EXISTS owners;",
        ),
        Migration::new(
            2,
            "Create api_keys table",
            r#"
            CREATE TABLE IF NOT EXISTS api_keys (
                id VARCHAR(64) PRIMARY KEY,
                owner_id VARCHAR(64) NOT NULL REFERENCES owners(id) ON DELETE CASCADE,
                name VARCHAR(100) NOT NULL,
                secret_hash VARCHAR(128) NOT NULL UNIQUE,
                key_prefix VARCHAR(64) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                last_used_at TIMESTAMPTZ,
                revoked_at TIMESTAMPTZ
            );
            CREATE INDEX IF NOT EXISTS idx_api_keys_owner ON api_keys(owner_id, created_at DESC);
            "#,
            "DROP TABLE IF EXISTS api_keys;",
        ),
        Migration::new(
            3,
            "Create set_records table",
            r#"
            CREATE TABLE IF NOT EXISTS set_records (
                id VARCHAR(64) PRIMARY KEY,
                owner_id VARCHAR(64) NOT NULL REFERENCES owners(id) ON DELETE CASCADE,
                exercise TEXT NOT NULL,
                weight DOUBLE PRECISION NOT NULL CHECK (weight >= 0),
                reps INTEGER NOT NULL CHECK (reps > 0),
                occurred_at TIMESTAMPTZ NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE INDEX IF NOT EXISTS idx_set_records_owner_time
                ON set_records(owner_id, occurred_at DESC);
            CREATE INDEX IF NOT EXISTS idx_set_records_owner_exercise
                ON set_records(owner_id, exercise);
            "#,
            "DROP TABLE IF EXISTS set_records;",
        ),
        Migration::new(
            4,
            "Create plan_records table",
            r#"
            CREATE TABLE IF NOT EXISTS plan_records (
                id VARCHAR(64) PRIMARY KEY,
                owner_id VARCHAR(64) NOT NULL REFERENCES owners(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                scheduled_for TIMESTAMPTZ,
                exercises JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE INDEX IF NOT EXISTS idx_plan_records_owner_created
                ON plan_records(owner_id, created_at DESC);
            "#,
            "DROP TABLE IF EXISTS plan_records;",
        ),
        Migration::new(
            5,
            "Create audit_entries table",
            r#"
            CREATE TABLE IF NOT EXISTS audit_entries (
                id VARCHAR(64) PRIMARY KEY,
                owner_id VARCHAR(64) NOT NULL REFERENCES owners(id) ON DELETE CASCADE,
                key_id VARCHAR(64) NOT NULL,
                command VARCHAR(64) NOT NULL,
                arguments JSONB NOT NULL,
                success BOOLEAN NOT NULL,
                error_kind VARCHAR(64),
                duration_ms BIGINT NOT NULL DEFAULT 0,
                caller_ip VARCHAR(64) NOT NULL DEFAULT 'unknown',
                user_agent TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE INDEX IF NOT EXISTS idx_audit_entries_owner_created
                ON audit_entries(owner_id, created_at DESC);
            "#,
            "DROP TABLE IF EXISTS audit_entries;",
        ),
    ]
}

/// Apply every pending schema migration
pub async fn run_schema_migrations(pool: &PgPool) -> Result<usize, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());
    let mut applied = 0;

    for migration in schema_migrations() {
        if migrator.run_migration(&migration).await? {
            applied += 1;
        }
    }

    Ok(applied)
}
