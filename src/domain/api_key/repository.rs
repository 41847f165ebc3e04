//! API Key repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{ApiKey, ApiKeyId};
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

/// Repository trait for API key storage
///
/// Implementations must enforce uniqueness of `secret_hash` so that
/// `get_by_hash` is a single indexed equality lookup.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + Debug {
    /// Get an API key by its ID
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError>;

    /// Get an API key by the digest of its secret (authentication lookup)
    async fn get_by_hash(&self, secret_hash: &str) -> Result<Option<ApiKey>, DomainError>;

    /// Create a new API key
    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, DomainError>;

    /// Update an existing API key
    async fn update(&self, api_key: &ApiKey) -> Result<ApiKey, DomainError>;

    /// Delete an API key
    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError>;

    /// List an owner's keys, newest first
    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<ApiKey>, DomainError>;

    /// Delete every key of an owner, returning how many were removed
    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError>;

    /// Record usage of an API key
    async fn record_usage(&self, id: &ApiKeyId) -> Result<(), DomainError>;
}
