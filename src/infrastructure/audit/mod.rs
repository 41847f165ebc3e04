//! Audit trail infrastructure

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresAuditRepository;
pub use repository::InMemoryAuditRepository;
pub use service::{AuditService, RecordAuditParams};
