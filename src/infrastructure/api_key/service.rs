//! Key store
//!
//! Issues, resolves, lists, revokes and deletes owner API keys. Secrets are
//! returned once at creation; only their digest is persisted.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository};
use crate::domain::owner::{Owner, OwnerId, OwnerRepository};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_auth_failure;

use super::generator::{hash_secret, KeyGenerator};

/// Result of creating a new API key
#[derive(Debug)]
pub struct CreatedKey {
    /// The key entity (digest only)
    pub api_key: ApiKey,
    /// The full secret, only ever returned here
    pub secret: String,
}

/// The principal behind a valid key
#[derive(Debug, Clone)]
pub struct ResolvedCaller {
    pub owner: Owner,
    pub key: ApiKey,
}

/// Key store over an API key repository and the owner registry
pub struct KeyStore {
    keys: Arc<dyn ApiKeyRepository>,
    owners: Arc<dyn OwnerRepository>,
    generator: KeyGenerator,
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore")
            .field("marker", &self.generator.marker())
            .finish()
    }
}

impl KeyStore {
    pub fn new(keys: Arc<dyn ApiKeyRepository>, owners: Arc<dyn OwnerRepository>) -> Self {
        Self {
            keys,
            owners,
            generator: KeyGenerator::default(),
        }
    }

    pub fn with_generator(mut self, generator: KeyGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Issue a new key for an existing owner
    pub async fn create_key(
        &self,
        owner_id: &OwnerId,
        name: &str,
    ) -> Result<CreatedKey, DomainError> {
        if !self.owners.exists(owner_id).await? {
            return Err(DomainError::not_found(format!(
                "Owner '{}' not found",
                owner_id
            )));
        }

        let generated = self.generator.generate();
        let api_key = ApiKey::new(
            ApiKeyId::generate(),
            owner_id.clone(),
            name,
            &generated.hash,
            &generated.prefix,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        let created = self.keys.create(api_key).await?;

        info!(
            key_id = %created.id(),
            owner_id = %owner_id,
            prefix = created.key_prefix(),
            "API key created"
        );

        Ok(CreatedKey {
            api_key: created,
            secret: generated.secret,
        })
    }

    /// Resolve a presented secret to its owner and key.
    ///
    /// Blank, unknown and revoked secrets all fail the same way. On success
    /// `last_used_at` is refreshed best-effort.
    pub async fn resolve(&self, secret: &str) -> Result<ResolvedCaller, DomainError> {
        match self.lookup(secret).await? {
            Some(caller) => {
                if let Err(e) = self.keys.record_usage(caller.key.id()).await {
                    warn!(key_id = %caller.key.id(), error = %e, "Failed to record key usage");
                }
                Ok(caller)
            }
            None => {
                record_auth_failure();
                Err(DomainError::authentication_required(
                    "A valid API key is required",
                ))
            }
        }
    }

    async fn lookup(&self, secret: &str) -> Result<Option<ResolvedCaller>, DomainError> {
        let secret = secret.trim();
        if secret.is_empty() {
            debug!("Rejected blank API key");
            return Ok(None);
        }

        let Some(key) = self.keys.get_by_hash(&hash_secret(secret)).await? else {
            debug!("No API key matches the presented secret");
            return Ok(None);
        };

        if !key.is_active() {
            debug!(key_id = %key.id(), "API key is revoked");
            return Ok(None);
        }

        let Some(owner) = self.owners.get(key.owner_id()).await? else {
            warn!(key_id = %key.id(), "API key references a missing owner");
            return Ok(None);
        };

        Ok(Some(ResolvedCaller { owner, key }))
    }

    /// An owner's keys, newest first
    pub async fn list_keys(&self, owner_id: &OwnerId) -> Result<Vec<ApiKey>, DomainError> {
        self.keys.list_by_owner(owner_id).await
    }

    /// Revoke one of the owner's keys. Idempotent: revoking twice keeps the
    /// first revocation time.
    pub async fn revoke(
        &self,
        owner_id: &OwnerId,
        key_id: &ApiKeyId,
    ) -> Result<ApiKey, DomainError> {
        let mut key = self.owned_key(owner_id, key_id).await?;

        if !key.revoke() {
            debug!(key_id = %key_id, "API key already revoked");
            return Ok(key);
        }

        let updated = self.keys.update(&key).await?;
        info!(key_id = %key_id, owner_id = %owner_id, "API key revoked");

        Ok(updated)
    }

    /// Delete one of the owner's keys
    pub async fn delete(&self, owner_id: &OwnerId, key_id: &ApiKeyId) -> Result<(), DomainError> {
        self.owned_key(owner_id, key_id).await?;

        if !self.keys.delete(key_id).await? {
            return Err(DomainError::not_found(format!(
                "API key '{}' not found",
                key_id
            )));
        }

        info!(key_id = %key_id, owner_id = %owner_id, "API key deleted");
        Ok(())
    }

    /// Another owner's key is indistinguishable from a missing one
    async fn owned_key(&self, owner_id: &OwnerId, key_id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        self.keys
            .get(key_id)
            .await?
            .filter(|key| key.is_owned_by(owner_id))
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", key_id)))
    }
}
