//! Workout domain
//!
//! Set records, workout plans and the shared rules applied to them:
//! exercise-name normalization, limit clamping, fuzzy fallback and
//! timestamp parsing.

mod exercise;
pub mod limits;
mod plan;
mod repository;
mod set_record;
mod timestamp;

pub use exercise::{normalize_exercise, ExerciseName, FuzzyMatch};
pub use limits::LimitRange;
pub use plan::{ExerciseSpec, PlanRecord, PlanRecordId};
pub use repository::{PlanRepository, SetRecordRepository};
pub use set_record::{validate_reps, validate_weight, SetRecord, SetRecordId};
pub use timestamp::parse_timestamp;
