//! Audit domain
//!
//! One immutable entry per dispatched command whose caller authenticated.

mod entity;
mod repository;

pub use entity::{AuditEntry, AuditEntryId, CallerContext};
pub use repository::AuditRepository;

#[cfg(test)]
pub use repository::MockAuditRepository;
