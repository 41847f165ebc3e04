//! In-memory API key repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository};
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

/// In-memory implementation of ApiKeyRepository
///
/// Keeps a digest → id index so authentication is a single map lookup and
/// duplicate digests are rejected.
#[derive(Debug)]
pub struct InMemoryApiKeyRepository {
    keys: Arc<RwLock<HashMap<String, ApiKey>>>,
    hash_index: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryApiKeyRepository {
    pub fn new() -> Self {
        Self {
            keys: Arc::new(RwLock::new(HashMap::new())),
            hash_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryApiKeyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        let keys = self.keys.read().await;
        Ok(keys.get(id.as_str()).cloned())
    }

    async fn get_by_hash(&self, secret_hash: &str) -> Result<Option<ApiKey>, DomainError> {
        let hash_index = self.hash_index.read().await;

        if let Some(key_id) = hash_index.get(secret_hash) {
            let keys = self.keys.read().await;
            Ok(keys.get(key_id).cloned())
        } else {
            Ok(None)
        }
    }

    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, DomainError> {
        let mut keys = self.keys.write().await;
        let mut hash_index = self.hash_index.write().await;

        let id = api_key.id().as_str().to_string();
        let hash = api_key.secret_hash().to_string();

        if keys.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "API key with ID '{}' already exists",
                id
            )));
        }

        if hash_index.contains_key(&hash) {
            return Err(DomainError::conflict("API key digest already exists"));
        }

        keys.insert(id.clone(), api_key.clone());
        hash_index.insert(hash, id);

        Ok(api_key)
    }

    async fn update(&self, api_key: &ApiKey) -> Result<ApiKey, DomainError> {
        let mut keys = self.keys.write().await;
        let id = api_key.id().as_str();

        match keys.get_mut(id) {
            Some(existing) => {
                *existing = api_key.clone();
                Ok(api_key.clone())
            }
            None => Err(DomainError::not_found(format!("API key '{}' not found", id))),
        }
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError> {
        let mut keys = self.keys.write().await;
        let mut hash_index = self.hash_index.write().await;

        if let Some(key) = keys.remove(id.as_str()) {
            hash_index.remove(key.secret_hash());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<ApiKey>, DomainError> {
        let keys = self.keys.read().await;

        let mut result: Vec<ApiKey> = keys
            .values()
            .filter(|k| k.is_owned_by(owner_id))
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_str().cmp(a.id().as_str()))
        });

        Ok(result)
    }

    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError> {
        let mut keys = self.keys.write().await;
        let mut hash_index = self.hash_index.write().await;

        let before = keys.len();
        keys.retain(|_, key| {
            let keep = !key.is_owned_by(owner_id);
            if !keep {
                hash_index.remove(key.secret_hash());
            }
            keep
        });

        Ok(before - keys.len())
    }

    async fn record_usage(&self, id: &ApiKeyId) -> Result<(), DomainError> {
        let mut keys = self.keys.write().await;

        if let Some(key) = keys.get_mut(id.as_str()) {
            key.record_usage();
            Ok(())
        } else {
            Err(DomainError::not_found(format!(
                "API key '{}' not found",
                id
            )))
        }
    }
}
