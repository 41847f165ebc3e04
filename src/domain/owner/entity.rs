//! Owner entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_owner_id, validate_owner_name, OwnerValidationError};

/// Owner identifier - alphanumeric + hyphens, max 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Create a new OwnerId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, OwnerValidationError> {
        let id = id.into();
        validate_owner_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(format!("own-{}", Uuid::new_v4()))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OwnerId {
    type Error = OwnerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OwnerId> for String {
    fn from(id: OwnerId) -> Self {
        id.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner entity
///
/// Created by registration flows outside the command core and never mutated
/// by it. Every owned entity carries the owner's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    id: OwnerId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Owner {
    /// Create a new owner; the name is trimmed before validation
    pub fn new(id: OwnerId, name: impl AsRef<str>) -> Result<Self, OwnerValidationError> {
        let name = name.as_ref().trim();
        validate_owner_name(name)?;

        Ok(Self {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        })
    }

    /// Rebuild an owner from persisted fields
    pub fn restore(id: OwnerId, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    pub fn id(&self) -> &OwnerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
