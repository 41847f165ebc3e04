//! In-memory owner repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::owner::{Owner, OwnerId, OwnerRepository};
use crate::domain::DomainError;

/// In-memory implementation of OwnerRepository
#[derive(Debug, Default)]
pub struct InMemoryOwnerRepository {
    owners: Arc<RwLock<HashMap<OwnerId, Owner>>>,
}

impl InMemoryOwnerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OwnerRepository for InMemoryOwnerRepository {
    async fn get(&self, id: &OwnerId) -> Result<Option<Owner>, DomainError> {
        let owners = self.owners.read().await;
        Ok(owners.get(id).cloned())
    }

    async fn create(&self, owner: Owner) -> Result<Owner, DomainError> {
        let mut owners = self.owners.write().await;

        if owners.contains_key(owner.id()) {
            return Err(DomainError::conflict(format!(
                "Owner '{}' already exists",
                owner.id()
            )));
        }

        owners.insert(owner.id().clone(), owner.clone());
        Ok(owner)
    }

    async fn delete(&self, id: &OwnerId) -> Result<bool, DomainError> {
        let mut owners = self.owners.write().await;
        Ok(owners.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<Owner>, DomainError> {
        let owners = self.owners.read().await;

        let mut result: Vec<Owner> = owners.values().cloned().collect();
        result.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });

        Ok(result)
    }
}
