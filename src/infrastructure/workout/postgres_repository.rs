//! PostgreSQL set record and plan repositories

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::owner::OwnerId;
use crate::domain::workout::{
    ExerciseName, ExerciseSpec, PlanRecord, PlanRecordId, PlanRepository, SetRecord, SetRecordId,
    SetRecordRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::storage::is_unique_violation;

const SET_COLUMNS: &str = "id, owner_id, exercise, weight, reps, occurred_at, created_at";
const SET_ORDER: &str = "ORDER BY occurred_at DESC, created_at DESC, id DESC";

/// PostgreSQL implementation of SetRecordRepository
#[derive(Debug, Clone)]
pub struct PostgresSetRecordRepository {
    pool: PgPool,
}

impl PostgresSetRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SetRecordRepository for PostgresSetRecordRepository {
    async fn create(&self, record: SetRecord) -> Result<SetRecord, DomainError> {
        let reps = i32::try_from(record.reps())
            .map_err(|_| DomainError::validation("reps is too large"))?;

        sqlx::query(
            r#"
            INSERT INTO set_records (id, owner_id, exercise, weight, reps, occurred_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id().as_str())
        .bind(record.owner_id().as_str())
        .bind(record.exercise().as_str())
        .bind(record.weight())
        .bind(reps)
        .bind(record.occurred_at())
        .bind(record.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("Set record '{}' already exists", record.id()))
            } else {
                DomainError::storage(format!("Failed to create set record: {}", e))
            }
        })?;

        Ok(record)
    }

    async fn latest_for_exercise(
        &self,
        owner_id: &OwnerId,
        exercise: &ExerciseName,
        limit: usize,
    ) -> Result<Vec<SetRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM set_records WHERE owner_id = $1 AND exercise = $2 {} LIMIT $3",
            SET_COLUMNS, SET_ORDER
        ))
        .bind(owner_id.as_str())
        .bind(exercise.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to query set records: {}", e)))?;

        rows.iter().map(row_to_set_record).collect()
    }

    async fn latest(&self, owner_id: &OwnerId, limit: usize) -> Result<Vec<SetRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM set_records WHERE owner_id = $1 {} LIMIT $2",
            SET_COLUMNS, SET_ORDER
        ))
        .bind(owner_id.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to query set records: {}", e)))?;

        rows.iter().map(row_to_set_record).collect()
    }

    async fn delete(&self, owner_id: &OwnerId, id: &SetRecordId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM set_records WHERE id = $1 AND owner_id = $2")
            .bind(id.as_str())
            .bind(owner_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete set record: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn distinct_exercises(&self, owner_id: &OwnerId) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar(
            "SELECT DISTINCT exercise FROM set_records WHERE owner_id = $1 ORDER BY exercise",
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list exercises: {}", e)))
    }

    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<SetRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM set_records WHERE owner_id = $1",
            SET_COLUMNS
        ))
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list set records: {}", e)))?;

        rows.iter().map(row_to_set_record).collect()
    }

    async fn list_all(&self) -> Result<Vec<SetRecord>, DomainError> {
        let rows = sqlx::query(&format!("SELECT {} FROM set_records", SET_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list set records: {}", e)))?;

        rows.iter().map(row_to_set_record).collect()
    }

    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM set_records WHERE owner_id = $1")
            .bind(owner_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete set records: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}

fn row_to_set_record(row: &sqlx::postgres::PgRow) -> Result<SetRecord, DomainError> {
    let id: String = row.get("id");
    let owner_id: String = row.get("owner_id");
    let exercise: String = row.get("exercise");
    let weight: f64 = row.get("weight");
    let reps: i32 = row.get("reps");
    let occurred_at: DateTime<Utc> = row.get("occurred_at");
    let created_at: DateTime<Utc> = row.get("created_at");

    let owner_id = OwnerId::new(&owner_id)
        .map_err(|e| DomainError::storage(format!("Invalid owner ID in database: {}", e)))?;
    let reps = u32::try_from(reps)
        .map_err(|_| DomainError::storage(format!("Invalid reps in database: {}", reps)))?;

    Ok(SetRecord::restore(
        SetRecordId::new(id),
        owner_id,
        ExerciseName::from_stored(exercise),
        weight,
        reps,
        occurred_at,
        created_at,
    ))
}

/// PostgreSQL implementation of PlanRepository
///
/// Exercises are stored as a JSONB array.
#[derive(Debug, Clone)]
pub struct PostgresPlanRepository {
    pool: PgPool,
}

impl PostgresPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PostgresPlanRepository {
    async fn create(&self, plan: PlanRecord) -> Result<PlanRecord, DomainError> {
        let exercises = serde_json::to_value(plan.exercises())
            .map_err(|e| DomainError::internal(format!("Failed to serialize exercises: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO plan_records (id, owner_id, name, scheduled_for, exercises, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(plan.id().as_str())
        .bind(plan.owner_id().as_str())
        .bind(plan.name())
        .bind(plan.scheduled_for())
        .bind(exercises)
        .bind(plan.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("Plan '{}' already exists", plan.id()))
            } else {
                DomainError::storage(format!("Failed to create plan: {}", e))
            }
        })?;

        Ok(plan)
    }

    async fn list_by_owner(
        &self,
        owner_id: &OwnerId,
        limit: usize,
    ) -> Result<Vec<PlanRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, name, scheduled_for, exercises, created_at
            FROM plan_records
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list plans: {}", e)))?;

        rows.iter().map(row_to_plan).collect()
    }

    async fn count_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plan_records WHERE owner_id = $1")
            .bind(owner_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count plans: {}", e)))?;

        Ok(count as usize)
    }

    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM plan_records WHERE owner_id = $1")
            .bind(owner_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete plans: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}

fn row_to_plan(row: &sqlx::postgres::PgRow) -> Result<PlanRecord, DomainError> {
    let id: String = row.get("id");
    let owner_id: String = row.get("owner_id");
    let exercises: serde_json::Value = row.get("exercises");
    let scheduled_for: Option<DateTime<Utc>> = row.get("scheduled_for");
    let created_at: DateTime<Utc> = row.get("created_at");

    let owner_id = OwnerId::new(&owner_id)
        .map_err(|e| DomainError::storage(format!("Invalid owner ID in database: {}", e)))?;
    let exercises: Vec<ExerciseSpec> = serde_json::from_value(exercises)
        .map_err(|e| DomainError::storage(format!("Invalid exercises in database: {}", e)))?;

    Ok(PlanRecord::restore(
        PlanRecordId::new(id),
        owner_id,
        row.get("name"),
        scheduled_for,
        exercises,
        created_at,
    ))
}
