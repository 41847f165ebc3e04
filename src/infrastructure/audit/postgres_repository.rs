//! PostgreSQL audit repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::api_key::ApiKeyId;
use crate::domain::audit::{AuditEntry, AuditEntryId, AuditRepository, CallerContext};
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

/// PostgreSQL implementation of AuditRepository
#[derive(Debug, Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO audit_entries (id, owner_id, key_id, command, arguments, success,
                                       error_kind, duration_ms, caller_ip, user_agent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(entry.id().as_str())
        .bind(entry.owner_id().as_str())
        .bind(entry.key_id().as_str())
        .bind(entry.command())
        .bind(entry.arguments())
        .bind(entry.success())
        .bind(entry.error_kind())
        .bind(i64::try_from(entry.duration_ms()).unwrap_or(i64::MAX))
        .bind(&entry.caller().ip_address)
        .bind(entry.caller().user_agent.as_deref())
        .bind(entry.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to record audit entry: {}", e)))?;

        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner_id: &OwnerId,
        limit: usize,
    ) -> Result<Vec<AuditEntry>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, key_id, command, arguments, success, error_kind,
                   duration_ms, caller_ip, user_agent, created_at
            FROM audit_entries
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list audit entries: {}", e)))?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM audit_entries WHERE owner_id = $1")
            .bind(owner_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete audit entries: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}

fn row_to_entry(row: &sqlx::postgres::PgRow) -> Result<AuditEntry, DomainError> {
    let id: String = row.get("id");
    let owner_id: String = row.get("owner_id");
    let key_id: String = row.get("key_id");
    let duration_ms: i64 = row.get("duration_ms");
    let created_at: DateTime<Utc> = row.get("created_at");

    let owner_id = OwnerId::new(&owner_id)
        .map_err(|e| DomainError::storage(format!("Invalid owner ID in database: {}", e)))?;
    let key_id = ApiKeyId::new(&key_id)
        .map_err(|e| DomainError::storage(format!("Invalid key ID in database: {}", e)))?;

    let caller = CallerContext {
        ip_address: row.get("caller_ip"),
        user_agent: row.get("user_agent"),
    };

    Ok(AuditEntry::restore(
        AuditEntryId::new(id),
        owner_id,
        key_id,
        row.get("command"),
        row.get("arguments"),
        row.get("success"),
        row.get("error_kind"),
        u64::try_from(duration_ms).unwrap_or_default(),
        caller,
        created_at,
    ))
}
