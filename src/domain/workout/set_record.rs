//! Set record entity

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::ExerciseName;
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

/// Unique identifier for a set record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetRecordId(String);

impl SetRecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("set-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SetRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check a weight value: finite and not negative
pub fn validate_weight(weight: f64) -> Result<(), DomainError> {
    if !weight.is_finite() {
        return Err(DomainError::validation("weight must be a finite number"));
    }

    if weight < 0.0 {
        return Err(DomainError::validation(format!(
            "weight must be 0 or greater, got {}",
            weight
        )));
    }

    Ok(())
}

/// Check a repetition count: strictly positive
pub fn validate_reps(reps: u32) -> Result<(), DomainError> {
    if reps == 0 {
        return Err(DomainError::validation("reps must be greater than 0"));
    }

    Ok(())
}

/// One performed set of an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    id: SetRecordId,
    owner_id: OwnerId,
    exercise: ExerciseName,
    weight: f64,
    reps: u32,
    occurred_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl SetRecord {
    /// Create a validated set record
    pub fn new(
        owner_id: OwnerId,
        exercise: ExerciseName,
        weight: f64,
        reps: u32,
        occurred_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_weight(weight)?;
        validate_reps(reps)?;

        Ok(Self {
            id: SetRecordId::generate(),
            owner_id,
            exercise,
            weight,
            reps,
            occurred_at,
            created_at: Utc::now(),
        })
    }

    /// Rebuild a record from persisted fields
    pub fn restore(
        id: SetRecordId,
        owner_id: OwnerId,
        exercise: ExerciseName,
        weight: f64,
        reps: u32,
        occurred_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            exercise,
            weight,
            reps,
            occurred_at,
            created_at,
        }
    }

    pub fn id(&self) -> &SetRecordId {
        &self.id
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn exercise(&self) -> &ExerciseName {
        &self.exercise
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Weight moved by this set (`weight × reps`)
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }

    /// Most recent first: `occurred_at`, then `created_at`, then id, all descending
    pub fn recency_cmp(a: &Self, b: &Self) -> Ordering {
        b.occurred_at
            .cmp(&a.occurred_at)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn owner() -> OwnerId {
        OwnerId::new("alice").unwrap()
    }

    fn bench() -> ExerciseName {
        ExerciseName::parse("Bench Press").unwrap()
    }

    #[test]
    fn test_valid_record() {
        let record = SetRecord::new(owner(), bench(), 135.0, 10, Utc::now()).unwrap();

        assert_eq!(record.exercise().as_str(), "bench press");
        assert_eq!(record.weight(), 135.0);
        assert_eq!(record.reps(), 10);
        assert_eq!(record.volume(), 1350.0);
        assert!(record.id().as_str().starts_with("set-"));
    }

    #[test]
    fn test_zero_weight_is_allowed() {
        assert!(SetRecord::new(owner(), bench(), 0.0, 12, Utc::now()).is_ok());
    }

    #[test]
    fn test_invalid_values() {
        assert!(SetRecord::new(owner(), bench(), -1.0, 5, Utc::now()).is_err());
        assert!(SetRecord::new(owner(), bench(), f64::NAN, 5, Utc::now()).is_err());
        assert!(SetRecord::new(owner(), bench(), 100.0, 0, Utc::now()).is_err());
    }

    #[test]
    fn test_recency_ordering() {
        let now = Utc::now();
        let older = SetRecord::new(owner(), bench(), 100.0, 5, now - Duration::hours(1)).unwrap();
        let newer = SetRecord::new(owner(), bench(), 100.0, 5, now).unwrap();

        let mut records = vec![older.clone(), newer.clone()];
        records.sort_by(SetRecord::recency_cmp);

        assert_eq!(records[0].id(), newer.id());
        assert_eq!(records[1].id(), older.id());
    }
}
