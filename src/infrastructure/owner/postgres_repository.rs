//! PostgreSQL owner repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::owner::{Owner, OwnerId, OwnerRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::is_unique_violation;

/// PostgreSQL implementation of OwnerRepository
///
/// Owned rows reference `owners(id)` with `ON DELETE CASCADE`.
#[derive(Debug, Clone)]
pub struct PostgresOwnerRepository {
    pool: PgPool,
}

impl PostgresOwnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnerRepository for PostgresOwnerRepository {
    async fn get(&self, id: &OwnerId) -> Result<Option<Owner>, DomainError> {
        let row = sqlx::query("SELECT id, name, created_at FROM owners WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get owner: {}", e)))?;

        row.as_ref().map(row_to_owner).transpose()
    }

    async fn create(&self, owner: Owner) -> Result<Owner, DomainError> {
        sqlx::query("INSERT INTO owners (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(owner.id().as_str())
            .bind(owner.name())
            .bind(owner.created_at())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::conflict(format!("Owner '{}' already exists", owner.id()))
                } else {
                    DomainError::storage(format!("Failed to create owner: {}", e))
                }
            })?;

        Ok(owner)
    }

    async fn delete(&self, id: &OwnerId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete owner: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Owner>, DomainError> {
        let rows = sqlx::query("SELECT id, name, created_at FROM owners ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list owners: {}", e)))?;

        rows.iter().map(row_to_owner).collect()
    }
}

fn row_to_owner(row: &sqlx::postgres::PgRow) -> Result<Owner, DomainError> {
    let id: String = row.get("id");
    let created_at: DateTime<Utc> = row.get("created_at");

    let owner_id = OwnerId::new(&id)
        .map_err(|e| DomainError::storage(format!("Invalid owner ID in database: {}", e)))?;

    Ok(Owner::restore(owner_id, row.get("name"), created_at))
}
