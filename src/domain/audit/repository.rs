//! Audit repository trait

use async_trait::async_trait;

use super::entity::AuditEntry;
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for audit entries
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Append an entry
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError>;

    /// The owner's entries, newest first
    async fn list_by_owner(
        &self,
        owner_id: &OwnerId,
        limit: usize,
    ) -> Result<Vec<AuditEntry>, DomainError>;

    /// Remove all entries of an owner
    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError>;
}
