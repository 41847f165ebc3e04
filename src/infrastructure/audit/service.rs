//! Audit service - best-effort recording and owner-scoped reads

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::api_key::ApiKeyId;
use crate::domain::audit::{AuditEntry, AuditRepository, CallerContext};
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;
use crate::infrastructure::observability::record_audit_failure;

/// Parameters for recording one invocation
#[derive(Debug, Clone)]
pub struct RecordAuditParams {
    pub owner_id: OwnerId,
    pub key_id: ApiKeyId,
    pub command: String,
    pub arguments: serde_json::Value,
    pub success: bool,
    pub error_kind: Option<String>,
    pub duration_ms: u64,
    pub caller: CallerContext,
}

impl RecordAuditParams {
    fn into_entry(self) -> AuditEntry {
        let entry = AuditEntry::new(
            self.owner_id,
            self.key_id,
            self.command,
            self.arguments,
            self.success,
            self.caller,
        )
        .with_duration_ms(self.duration_ms);

        match self.error_kind {
            Some(kind) => entry.with_error_kind(kind),
            None => entry,
        }
    }
}

/// Audit service
pub struct AuditService {
    repository: Arc<dyn AuditRepository>,
    timeout: Duration,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AuditService {
    pub fn new(repository: Arc<dyn AuditRepository>) -> Self {
        Self {
            repository,
            timeout: Duration::from_millis(2000),
        }
    }

    /// Upper bound on how long a single write may hold the caller
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Persist an audit entry. Failures and timeouts are logged and dropped;
    /// the caller never sees them.
    pub async fn record(&self, params: RecordAuditParams) {
        let entry = params.into_entry();
        let entry_id = entry.id().clone();
        let command = entry.command().to_string();

        match tokio::time::timeout(self.timeout, self.repository.record(entry)).await {
            Ok(Ok(())) => debug!(audit_id = %entry_id, command = %command, "Audit entry recorded"),
            Ok(Err(e)) => {
                record_audit_failure();
                warn!(audit_id = %entry_id, command = %command, error = %e, "Failed to record audit entry");
            }
            Err(_) => {
                record_audit_failure();
                warn!(
                    audit_id = %entry_id,
                    command = %command,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Audit write timed out"
                );
            }
        }
    }

    /// The owner's entries, newest first
    pub async fn list(&self, owner_id: &OwnerId, limit: usize) -> Result<Vec<AuditEntry>, DomainError> {
        self.repository.list_by_owner(owner_id, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::MockAuditRepository;
    use crate::infrastructure::audit::InMemoryAuditRepository;
    use serde_json::json;

    fn params(success: bool) -> RecordAuditParams {
        RecordAuditParams {
            owner_id: OwnerId::new("alice").unwrap(),
            key_id: ApiKeyId::new("key-1").unwrap(),
            command: "log_set".to_string(),
            arguments: json!({"exercise": "squat"}),
            success,
            error_kind: (!success).then(|| "validation_error".to_string()),
            duration_ms: 2,
            caller: CallerContext::unknown(),
        }
    }

    #[tokio::test]
    async fn test_record_and_list() {
        let repo = Arc::new(InMemoryAuditRepository::new());
        let service = AuditService::new(repo.clone());

        service.record(params(true)).await;
        service.record(params(false)).await;

        let entries = service
            .list(&OwnerId::new("alice").unwrap(), 10)
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].success());
        assert_eq!(entries[0].error_kind(), Some("validation_error"));
        assert_eq!(entries[1].error_kind(), None);
    }

    #[tokio::test]
    async fn test_repository_failure_is_swallowed() {
        let mut mock = MockAuditRepository::new();
        mock.expect_record()
            .times(1)
            .returning(|_| Err(DomainError::storage("disk full")));

        let service = AuditService::new(Arc::new(mock));
        service.record(params(true)).await;
    }

    #[derive(Debug)]
    struct SlowAuditRepository;

    #[async_trait::async_trait]
    impl AuditRepository for SlowAuditRepository {
        async fn record(&self, _entry: AuditEntry) -> Result<(), DomainError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }

        async fn list_by_owner(
            &self,
            _owner_id: &OwnerId,
            _limit: usize,
        ) -> Result<Vec<AuditEntry>, DomainError> {
            Ok(vec![])
        }

        async fn delete_by_owner(&self, _owner_id: &OwnerId) -> Result<usize, DomainError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_slow_repository_is_bounded() {
        let service = AuditService::new(Arc::new(SlowAuditRepository))
            .with_timeout(Duration::from_millis(20));

        let started = std::time::Instant::now();
        service.record(params(true)).await;
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
