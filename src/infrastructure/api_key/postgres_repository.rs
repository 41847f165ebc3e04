//! PostgreSQL API key repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository};
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;
use crate::infrastructure::storage::is_unique_violation;

const KEY_COLUMNS: &str =
    "id, owner_id, name, secret_hash, key_prefix, created_at, last_used_at, revoked_at";

/// PostgreSQL implementation of ApiKeyRepository
#[derive(Debug, Clone)]
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM api_keys WHERE id = $1", KEY_COLUMNS))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get API key: {}", e)))?;

        row.as_ref().map(row_to_api_key).transpose()
    }

    async fn get_by_hash(&self, secret_hash: &str) -> Result<Option<ApiKey>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM api_keys WHERE secret_hash = $1",
            KEY_COLUMNS
        ))
        .bind(secret_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to look up API key: {}", e)))?;

        row.as_ref().map(row_to_api_key).transpose()
    }

    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO api_keys (id, owner_id, name, secret_hash, key_prefix,
                                  created_at, last_used_at, revoked_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(api_key.id().as_str())
        .bind(api_key.owner_id().as_str())
        .bind(api_key.name())
        .bind(api_key.secret_hash())
        .bind(api_key.key_prefix())
        .bind(api_key.created_at())
        .bind(api_key.last_used_at())
        .bind(api_key.revoked_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!(
                    "API key '{}' or its digest already exists",
                    api_key.id()
                ))
            } else {
                DomainError::storage(format!("Failed to create API key: {}", e))
            }
        })?;

        Ok(api_key)
    }

    async fn update(&self, api_key: &ApiKey) -> Result<ApiKey, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE api_keys
            SET name = $2, last_used_at = $3, revoked_at = $4
            WHERE id = $1
            "#,
        )
        .bind(api_key.id().as_str())
        .bind(api_key.name())
        .bind(api_key.last_used_at())
        .bind(api_key.revoked_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update API key: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "API key '{}' not found",
                api_key.id()
            )));
        }

        Ok(api_key.clone())
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete API key: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<ApiKey>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM api_keys WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
            KEY_COLUMNS
        ))
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list API keys: {}", e)))?;

        rows.iter().map(row_to_api_key).collect()
    }

    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE owner_id = $1")
            .bind(owner_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete API keys: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn record_usage(&self, id: &ApiKeyId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE api_keys SET last_used_at = NOW() WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to record key usage: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("API key '{}' not found", id)));
        }

        Ok(())
    }
}

fn row_to_api_key(row: &sqlx::postgres::PgRow) -> Result<ApiKey, DomainError> {
    let id: String = row.get("id");
    let owner_id: String = row.get("owner_id");
    let created_at: DateTime<Utc> = row.get("created_at");
    let last_used_at: Option<DateTime<Utc>> = row.get("last_used_at");
    let revoked_at: Option<DateTime<Utc>> = row.get("revoked_at");

    let key_id = ApiKeyId::new(&id)
        .map_err(|e| DomainError::storage(format!("Invalid API key ID in database: {}", e)))?;
    let owner_id = OwnerId::new(&owner_id)
        .map_err(|e| DomainError::storage(format!("Invalid owner ID in database: {}", e)))?;

    Ok(ApiKey::restore(
        key_id,
        owner_id,
        row.get("name"),
        row.get("secret_hash"),
        row.get("key_prefix"),
        created_at,
        last_used_at,
        revoked_at,
    ))
}
