//! Domain layer - Core business logic and entities

pub mod api_key;
pub mod audit;
pub mod command;
pub mod error;
pub mod owner;
pub mod stats;
pub mod workout;

pub use api_key::{ApiKey, ApiKeyId, ApiKeyRepository, ApiKeyValidationError};
pub use audit::{AuditEntry, AuditEntryId, AuditRepository, CallerContext};
pub use command::{CommandName, CommandOutcome};
pub use error::DomainError;
pub use owner::{Owner, OwnerId, OwnerRepository, OwnerValidationError};
pub use stats::{ExercisePopularity, OwnerStatistics};
pub use workout::{
    ExerciseName, ExerciseSpec, PlanRecord, PlanRecordId, PlanRepository, SetRecord, SetRecordId,
    SetRecordRepository,
};
