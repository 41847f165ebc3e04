//! In-memory audit repository implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::audit::{AuditEntry, AuditRepository};
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

/// Append-only in-memory audit log
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl InMemoryAuditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across all owners
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner_id: &OwnerId,
        limit: usize,
    ) -> Result<Vec<AuditEntry>, DomainError> {
        let entries = self.entries.read().await;

        // Appended in time order, so reverse iteration is newest first
        Ok(entries
            .iter()
            .rev()
            .filter(|e| e.owner_id() == owner_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.owner_id() != owner_id);
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::ApiKeyId;
    use crate::domain::audit::CallerContext;
    use serde_json::json;

    fn entry(owner: &str, command: &str) -> AuditEntry {
        AuditEntry::new(
            OwnerId::new(owner).unwrap(),
            ApiKeyId::new("key-1").unwrap(),
            command,
            json!({}),
            true,
            CallerContext::unknown(),
        )
    }

    #[tokio::test]
    async fn test_newest_first_and_scoped() {
        let repo = InMemoryAuditRepository::new();
        repo.record(entry("alice", "log_set")).await.unwrap();
        repo.record(entry("bob", "log_set")).await.unwrap();
        repo.record(entry("alice", "get_last_set")).await.unwrap();

        let alice = OwnerId::new("alice").unwrap();
        let listed = repo.list_by_owner(&alice, 10).await.unwrap();
        let commands: Vec<&str> = listed.iter().map(|e| e.command()).collect();
        assert_eq!(commands, vec!["get_last_set", "log_set"]);

        assert_eq!(repo.list_by_owner(&alice, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let repo = InMemoryAuditRepository::new();
        repo.record(entry("alice", "log_set")).await.unwrap();
        repo.record(entry("bob", "log_set")).await.unwrap();

        let alice = OwnerId::new("alice").unwrap();
        assert_eq!(repo.delete_by_owner(&alice).await.unwrap(), 1);
        assert_eq!(repo.len().await, 1);
    }
}
