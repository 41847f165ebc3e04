//! Owner repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Owner, OwnerId};
use crate::domain::DomainError;

/// Repository trait for owner storage
#[async_trait]
pub trait OwnerRepository: Send + Sync + Debug {
    /// Get an owner by ID
    async fn get(&self, id: &OwnerId) -> Result<Option<Owner>, DomainError>;

    /// Create a new owner
    async fn create(&self, owner: Owner) -> Result<Owner, DomainError>;

    /// Delete an owner; storage cascades to owned rows where it supports it
    async fn delete(&self, id: &OwnerId) -> Result<bool, DomainError>;

    /// List all owners, oldest first
    async fn list(&self) -> Result<Vec<Owner>, DomainError>;

    /// Check if an owner exists
    async fn exists(&self, id: &OwnerId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
