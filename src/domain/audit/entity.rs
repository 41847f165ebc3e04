//! Audit entry entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::api_key::ApiKeyId;
use crate::domain::owner::OwnerId;

/// Audit entry ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditEntryId(String);

impl AuditEntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("audit-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuditEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the transport knows about the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerContext {
    /// IP address of the requester, `"unknown"` when the transport has none
    pub ip_address: String,
    /// User agent string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl CallerContext {
    pub fn unknown() -> Self {
        Self {
            ip_address: "unknown".to_string(),
            user_agent: None,
        }
    }

    pub fn from_ip(ip: impl Into<String>) -> Self {
        Self {
            ip_address: ip.into(),
            user_agent: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl Default for CallerContext {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Audit entry for one dispatched command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    id: AuditEntryId,
    owner_id: OwnerId,
    key_id: ApiKeyId,
    command: String,
    arguments: serde_json::Value,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<String>,
    duration_ms: u64,
    caller: CallerContext,
    created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        owner_id: OwnerId,
        key_id: ApiKeyId,
        command: impl Into<String>,
        arguments: serde_json::Value,
        success: bool,
        caller: CallerContext,
    ) -> Self {
        Self {
            id: AuditEntryId::generate(),
            owner_id,
            key_id,
            command: command.into(),
            arguments,
            success,
            error_kind: None,
            duration_ms: 0,
            caller,
            created_at: Utc::now(),
        }
    }

    pub fn with_error_kind(mut self, kind: impl Into<String>) -> Self {
        self.error_kind = Some(kind.into());
        self
    }

    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Rebuild an entry from persisted fields
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: AuditEntryId,
        owner_id: OwnerId,
        key_id: ApiKeyId,
        command: String,
        arguments: serde_json::Value,
        success: bool,
        error_kind: Option<String>,
        duration_ms: u64,
        caller: CallerContext,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            key_id,
            command,
            arguments,
            success,
            error_kind,
            duration_ms,
            caller,
            created_at,
        }
    }

    pub fn id(&self) -> &AuditEntryId {
        &self.id
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn key_id(&self) -> &ApiKeyId {
        &self.key_id
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn arguments(&self) -> &serde_json::Value {
        &self.arguments
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn error_kind(&self) -> Option<&str> {
        self.error_kind.as_deref()
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn caller(&self) -> &CallerContext {
        &self.caller
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
