//! Workout plan entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::ExerciseName;
use super::set_record::{validate_reps, validate_weight};
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

/// Unique identifier for a plan record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanRecordId(String);

impl PlanRecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("plan-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlanRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One exercise prescribed by a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSpec {
    pub name: ExerciseName,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
}

impl ExerciseSpec {
    pub fn new(name: ExerciseName, sets: u32, reps: u32, weight: f64) -> Result<Self, DomainError> {
        if sets == 0 {
            return Err(DomainError::validation("sets must be greater than 0"));
        }
        validate_reps(reps)?;
        validate_weight(weight)?;

        Ok(Self {
            name,
            sets,
            reps,
            weight,
        })
    }
}

/// A named workout plan; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    id: PlanRecordId,
    owner_id: OwnerId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled_for: Option<DateTime<Utc>>,
    exercises: Vec<ExerciseSpec>,
    created_at: DateTime<Utc>,
}

impl PlanRecord {
    /// Create a plan; requires a non-empty name and at least one exercise
    pub fn new(
        owner_id: OwnerId,
        name: &str,
        exercises: Vec<ExerciseSpec>,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(DomainError::validation("workout name cannot be empty"));
        }

        if exercises.is_empty() {
            return Err(DomainError::validation(
                "exercises must be a non-empty list",
            ));
        }

        Ok(Self {
            id: PlanRecordId::generate(),
            owner_id,
            name: name.to_string(),
            scheduled_for,
            exercises,
            created_at: Utc::now(),
        })
    }

    /// Rebuild a plan from persisted fields
    pub fn restore(
        id: PlanRecordId,
        owner_id: OwnerId,
        name: String,
        scheduled_for: Option<DateTime<Utc>>,
        exercises: Vec<ExerciseSpec>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            scheduled_for,
            exercises,
            created_at,
        }
    }

    pub fn id(&self) -> &PlanRecordId {
        &self.id
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scheduled_for(&self) -> Option<DateTime<Utc>> {
        self.scheduled_for
    }

    pub fn exercises(&self) -> &[ExerciseSpec] {
        &self.exercises
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> ExerciseSpec {
        ExerciseSpec::new(ExerciseName::parse(name).unwrap(), 3, 8, 100.0).unwrap()
    }

    #[test]
    fn test_exercise_spec_validation() {
        let name = ExerciseName::parse("squat").unwrap();
        assert!(ExerciseSpec::new(name.clone(), 0, 8, 100.0).is_err());
        assert!(ExerciseSpec::new(name.clone(), 3, 0, 100.0).is_err());
        assert!(ExerciseSpec::new(name.clone(), 3, 8, -5.0).is_err());
        assert!(ExerciseSpec::new(name, 3, 8, 0.0).is_ok());
    }

    #[test]
    fn test_plan_creation() {
        let plan = PlanRecord::new(
            OwnerId::new("alice").unwrap(),
            "  Push Day ",
            vec![spec("Bench Press"), spec("Overhead Press")],
            None,
        )
        .unwrap();

        assert_eq!(plan.name(), "Push Day");
        assert_eq!(plan.exercises().len(), 2);
        assert_eq!(plan.exercises()[0].name.as_str(), "bench press");
        assert!(plan.id().as_str().starts_with("plan-"));
    }

    #[test]
    fn test_plan_requires_exercises_and_name() {
        let owner = OwnerId::new("alice").unwrap();
        assert!(PlanRecord::new(owner.clone(), "Leg Day", vec![], None).is_err());
        assert!(PlanRecord::new(owner, " ", vec![spec("squat")], None).is_err());
    }
}
