//! Dispatch service - the single entry point for command invocation
//!
//! Authenticates the caller, routes the command, records metrics and writes
//! exactly one audit entry per authenticated invocation.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::domain::audit::{AuditEntry, CallerContext};
use crate::domain::command::{CommandName, CommandOutcome};
use crate::domain::workout::limits::AUDIT_LIST_LIMIT;
use crate::domain::DomainError;
use crate::infrastructure::api_key::KeyStore;
use crate::infrastructure::audit::{AuditService, RecordAuditParams};
use crate::infrastructure::observability::{record_command, CommandMetricParams};

use super::command_service::CommandService;

/// Routes authenticated invocations to the command service
pub struct DispatchService {
    key_store: Arc<KeyStore>,
    commands: Arc<CommandService>,
    audit: Arc<AuditService>,
}

impl std::fmt::Debug for DispatchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchService").finish_non_exhaustive()
    }
}

impl DispatchService {
    pub fn new(
        key_store: Arc<KeyStore>,
        commands: Arc<CommandService>,
        audit: Arc<AuditService>,
    ) -> Self {
        Self {
            key_store,
            commands,
            audit,
        }
    }

    /// Invoke `command` with `args` on behalf of the key holder.
    ///
    /// Returns `Err` only when authentication fails; every other failure is
    /// reported inside the outcome.
    #[instrument(skip(self, secret, args, caller), fields(command = %command))]
    pub async fn invoke(
        &self,
        secret: &str,
        command: &str,
        args: Value,
        caller: CallerContext,
    ) -> Result<CommandOutcome, DomainError> {
        let resolved = self.key_store.resolve(secret).await?;
        let started = Instant::now();

        let (label, mutation, outcome) = match command.parse::<CommandName>() {
            Ok(name) => (
                name.as_str(),
                name.is_mutation(),
                self.commands.execute(&resolved.owner, name, &args).await,
            ),
            Err(e) => ("unknown", false, CommandOutcome::from(e)),
        };

        let elapsed = started.elapsed();

        record_command(CommandMetricParams {
            command: label,
            outcome: outcome.outcome_label(),
            duration: elapsed,
        });

        if outcome.is_success() {
            info!(
                owner_id = %resolved.owner.id(),
                key_id = %resolved.key.id(),
                mutation,
                duration_ms = elapsed.as_millis() as u64,
                "Command succeeded"
            );
        } else {
            warn!(
                owner_id = %resolved.owner.id(),
                key_id = %resolved.key.id(),
                mutation,
                error_kind = outcome.outcome_label(),
                "Command failed"
            );
        }

        self.audit
            .record(RecordAuditParams {
                owner_id: resolved.owner.id().clone(),
                key_id: resolved.key.id().clone(),
                command: command.trim().to_string(),
                arguments: args,
                success: outcome.is_success(),
                error_kind: outcome.error.clone(),
                duration_ms: elapsed.as_millis() as u64,
                caller,
            })
            .await;

        Ok(outcome)
    }

    /// The key holder's own audit trail, newest first
    pub async fn list_audit_entries(
        &self,
        secret: &str,
        limit: Option<i64>,
    ) -> Result<Vec<AuditEntry>, DomainError> {
        let resolved = self.key_store.resolve(secret).await?;
        self.audit
            .list(resolved.owner.id(), AUDIT_LIST_LIMIT.clamp(limit))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::MockAuditRepository;
    use crate::domain::owner::{Owner, OwnerId, OwnerRepository};
    use crate::infrastructure::api_key::InMemoryApiKeyRepository;
    use crate::infrastructure::audit::InMemoryAuditRepository;
    use crate::infrastructure::owner::InMemoryOwnerRepository;
    use crate::infrastructure::workout::{InMemoryPlanRepository, InMemorySetRecordRepository};
    use serde_json::json;

    struct Fixture {
        dispatch: DispatchService,
        audit: Arc<InMemoryAuditRepository>,
        alice_secret: String,
        bob_secret: String,
    }

    async fn key_store() -> (Arc<KeyStore>, String, String) {
        let owners = Arc::new(InMemoryOwnerRepository::new());
        for (id, name) in [("alice", "Alice"), ("bob", "Bob")] {
            owners
                .create(Owner::new(OwnerId::new(id).unwrap(), name).unwrap())
                .await
                .unwrap();
        }

        let store = Arc::new(KeyStore::new(
            Arc::new(InMemoryApiKeyRepository::new()),
            owners,
        ));
        let alice = store
            .create_key(&OwnerId::new("alice").unwrap(), "Phone")
            .await
            .unwrap();
        let bob = store
            .create_key(&OwnerId::new("bob").unwrap(), "Phone")
            .await
            .unwrap();

        (store, alice.secret, bob.secret)
    }

    fn commands() -> Arc<CommandService> {
        Arc::new(CommandService::new(
            Arc::new(InMemorySetRecordRepository::new()),
            Arc::new(InMemoryPlanRepository::new()),
        ))
    }

    async fn fixture() -> Fixture {
        let (store, alice_secret, bob_secret) = key_store().await;
        let audit = Arc::new(InMemoryAuditRepository::new());

        Fixture {
            dispatch: DispatchService::new(
                store,
                commands(),
                Arc::new(AuditService::new(audit.clone())),
            ),
            audit,
            alice_secret,
            bob_secret,
        }
    }

    #[tokio::test]
    async fn test_success_is_audited_once() {
        let f = fixture().await;

        let outcome = f
            .dispatch
            .invoke(
                &f.alice_secret,
                "log_set",
                json!({"exercise": "Bench Press", "weight": 145, "reps": 8}),
                CallerContext::from_ip("10.0.0.1"),
            )
            .await
            .unwrap();
        assert!(outcome.success);

        let entries = f
            .dispatch
            .list_audit_entries(&f.alice_secret, None)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].success());
        assert_eq!(entries[0].command(), "log_set");
        assert_eq!(entries[0].error_kind(), None);
        assert_eq!(entries[0].caller().ip_address, "10.0.0.1");
    }

    #[tokio::test]
    async fn test_failed_command_is_audited_as_failure() {
        let f = fixture().await;

        let outcome = f
            .dispatch
            .invoke(
                &f.alice_secret,
                "log_set",
                json!({"exercise": "squat", "weight": -1, "reps": 5}),
                CallerContext::unknown(),
            )
            .await
            .unwrap();
        assert!(!outcome.success);

        assert_eq!(f.audit.len().await, 1);
        let entries = f
            .dispatch
            .list_audit_entries(&f.alice_secret, Some(5))
            .await
            .unwrap();
        assert!(!entries[0].success());
        assert_eq!(entries[0].error_kind(), Some("validation_error"));
    }

    #[tokio::test]
    async fn test_unknown_command_is_audited() {
        let f = fixture().await;

        let outcome = f
            .dispatch
            .invoke(&f.alice_secret, "fly_to_moon", json!({}), CallerContext::unknown())
            .await
            .unwrap();

        assert_eq!(outcome.error.as_deref(), Some("validation_error"));
        assert!(outcome.message.unwrap().contains("fly_to_moon"));
        assert_eq!(f.audit.len().await, 1);
    }

    #[tokio::test]
    async fn test_authentication_failure_is_not_audited() {
        let f = fixture().await;

        let err = f
            .dispatch
            .invoke("fg_live_nope", "get_recent_sets", json!({}), CallerContext::unknown())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "authentication_required");
        assert!(f.audit.is_empty().await);
    }

    #[tokio::test]
    async fn test_owners_see_only_their_data() {
        let f = fixture().await;

        f.dispatch
            .invoke(
                &f.alice_secret,
                "log_set",
                json!({"exercise": "squat", "weight": 100, "reps": 5}),
                CallerContext::unknown(),
            )
            .await
            .unwrap();

        let bob = f
            .dispatch
            .invoke(&f.bob_secret, "get_recent_sets", json!({}), CallerContext::unknown())
            .await
            .unwrap();
        assert!(!bob.success);

        let bob_audit = f
            .dispatch
            .list_audit_entries(&f.bob_secret, None)
            .await
            .unwrap();
        assert_eq!(bob_audit.len(), 1);
        assert_eq!(bob_audit[0].command(), "get_recent_sets");
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_change_outcome() {
        let (store, alice_secret, _) = key_store().await;

        let mut mock = MockAuditRepository::new();
        mock.expect_record()
            .times(1)
            .returning(|_| Err(DomainError::storage("audit table unavailable")));

        let dispatch = DispatchService::new(
            store,
            commands(),
            Arc::new(AuditService::new(Arc::new(mock))),
        );

        let outcome = dispatch
            .invoke(
                &alice_secret,
                "log_set",
                json!({"exercise": "deadlift", "weight": 200, "reps": 3}),
                CallerContext::unknown(),
            )
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.data.unwrap()["exercise"], "deadlift");
    }
}
