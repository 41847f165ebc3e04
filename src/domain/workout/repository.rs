//! Set and plan repository traits

use async_trait::async_trait;
use std::fmt::Debug;

use super::exercise::ExerciseName;
use super::plan::PlanRecord;
use super::set_record::{SetRecord, SetRecordId};
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

/// Repository for set records
///
/// Every read and delete is scoped by owner. Ordering for the "latest"
/// queries follows [`SetRecord::recency_cmp`].
#[async_trait]
pub trait SetRecordRepository: Send + Sync + Debug {
    /// Persist a new record
    async fn create(&self, record: SetRecord) -> Result<SetRecord, DomainError>;

    /// The owner's most recent records for one exercise
    async fn latest_for_exercise(
        &self,
        owner_id: &OwnerId,
        exercise: &ExerciseName,
        limit: usize,
    ) -> Result<Vec<SetRecord>, DomainError>;

    /// The owner's most recent records across all exercises
    async fn latest(&self, owner_id: &OwnerId, limit: usize) -> Result<Vec<SetRecord>, DomainError>;

    /// Delete one of the owner's records; false when it does not exist or
    /// belongs to someone else
    async fn delete(&self, owner_id: &OwnerId, id: &SetRecordId) -> Result<bool, DomainError>;

    /// The owner's distinct exercise names, sorted
    async fn distinct_exercises(&self, owner_id: &OwnerId) -> Result<Vec<String>, DomainError>;

    /// Every record of the owner, unordered
    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<SetRecord>, DomainError>;

    /// Every record of every owner, unordered
    async fn list_all(&self) -> Result<Vec<SetRecord>, DomainError>;

    /// Remove all records of an owner
    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError>;
}

/// Repository for workout plans
#[async_trait]
pub trait PlanRepository: Send + Sync + Debug {
    /// Persist a new plan
    async fn create(&self, plan: PlanRecord) -> Result<PlanRecord, DomainError>;

    /// The owner's plans, newest first
    async fn list_by_owner(
        &self,
        owner_id: &OwnerId,
        limit: usize,
    ) -> Result<Vec<PlanRecord>, DomainError>;

    /// Number of plans the owner has
    async fn count_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError>;

    /// Remove all plans of an owner
    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError>;
}
