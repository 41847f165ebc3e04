//! API Key entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    validate_api_key_id, validate_api_key_name, ApiKeyValidationError, KEY_ID_MARKER,
};
use crate::domain::owner::OwnerId;

/// API key identifier: `key-` plus alphanumerics and hyphens
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiKeyId(String);

impl ApiKeyId {
    /// Create a new ApiKeyId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ApiKeyValidationError> {
        let id = id.into();
        validate_api_key_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(format!("{}{}", KEY_ID_MARKER, Uuid::new_v4()))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ApiKeyId {
    type Error = ApiKeyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApiKeyId> for String {
    fn from(id: ApiKeyId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// API Key entity
///
/// A key is active iff `revoked_at` is unset. Revocation is soft: the row
/// stays so its audit history keeps a valid reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Unique identifier for the key
    id: ApiKeyId,
    /// Owner the key authenticates as
    owner_id: OwnerId,
    /// Display name for the key
    name: String,
    /// Hashed secret, format `sha256$<base64url>`. Never serialized.
    #[serde(skip_serializing, default)]
    secret_hash: String,
    /// Leading characters of the secret, for display only
    key_prefix: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last time the key authenticated a request
    #[serde(skip_serializing_if = "Option::is_none")]
    last_used_at: Option<DateTime<Utc>>,
    /// Revocation timestamp (None = active)
    #[serde(skip_serializing_if = "Option::is_none")]
    revoked_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// Create a new active API key; the name is trimmed before validation
    pub fn new(
        id: ApiKeyId,
        owner_id: OwnerId,
        name: impl AsRef<str>,
        secret_hash: impl Into<String>,
        key_prefix: impl Into<String>,
    ) -> Result<Self, ApiKeyValidationError> {
        let name = name.as_ref().trim();
        validate_api_key_name(name)?;

        Ok(Self {
            id,
            owner_id,
            name: name.to_string(),
            secret_hash: secret_hash.into(),
            key_prefix: key_prefix.into(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        })
    }

    /// Rebuild a key from persisted fields
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ApiKeyId,
        owner_id: OwnerId,
        name: String,
        secret_hash: String,
        key_prefix: String,
        created_at: DateTime<Utc>,
        last_used_at: Option<DateTime<Utc>>,
        revoked_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            secret_hash,
            key_prefix,
            created_at,
            last_used_at,
            revoked_at,
        }
    }

    // Getters

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret_hash(&self) -> &str {
        &self.secret_hash
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        self.last_used_at
    }

    pub fn revoked_at(&self) -> Option<DateTime<Utc>> {
        self.revoked_at
    }

    // Status checks

    /// Only active keys authenticate
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }

    /// Whether the key belongs to the given owner
    pub fn is_owned_by(&self, owner_id: &OwnerId) -> bool {
        &self.owner_id == owner_id
    }

    // Mutators

    /// Revoke the key. Returns false when it was already revoked, in which
    /// case the original revocation time is kept.
    pub fn revoke(&mut self) -> bool {
        if self.revoked_at.is_some() {
            return false;
        }

        self.revoked_at = Some(Utc::now());
        true
    }

    /// Record key usage
    pub fn record_usage(&mut self) {
        self.last_used_at = Some(Utc::now());
    }
}
