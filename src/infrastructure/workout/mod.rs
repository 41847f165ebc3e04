//! Set record and workout plan storage

mod postgres_repository;
mod repository;

pub use postgres_repository::{PostgresPlanRepository, PostgresSetRecordRepository};
pub use repository::{InMemoryPlanRepository, InMemorySetRecordRepository};
