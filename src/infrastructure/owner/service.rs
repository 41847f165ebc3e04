//! Owner service - registration and cascading removal

use std::sync::Arc;

use tracing::info;

use crate::domain::api_key::ApiKeyRepository;
use crate::domain::audit::AuditRepository;
use crate::domain::owner::{Owner, OwnerId, OwnerRepository};
use crate::domain::workout::{PlanRepository, SetRecordRepository};
use crate::domain::DomainError;

/// Registers owners and removes them together with everything they own
pub struct OwnerService {
    owners: Arc<dyn OwnerRepository>,
    keys: Arc<dyn ApiKeyRepository>,
    sets: Arc<dyn SetRecordRepository>,
    plans: Arc<dyn PlanRepository>,
    audit: Arc<dyn AuditRepository>,
}

impl std::fmt::Debug for OwnerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerService").finish_non_exhaustive()
    }
}

impl OwnerService {
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        keys: Arc<dyn ApiKeyRepository>,
        sets: Arc<dyn SetRecordRepository>,
        plans: Arc<dyn PlanRepository>,
        audit: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            owners,
            keys,
            sets,
            plans,
            audit,
        }
    }

    /// Register an owner; a fresh id is generated when none is given
    pub async fn create(&self, id: Option<&str>, name: &str) -> Result<Owner, DomainError> {
        let id = match id {
            Some(raw) => OwnerId::new(raw).map_err(|e| DomainError::validation(e.to_string()))?,
            None => OwnerId::generate(),
        };

        let owner = Owner::new(id, name).map_err(|e| DomainError::validation(e.to_string()))?;
        let created = self.owners.create(owner).await?;

        info!(owner_id = %created.id(), "Owner created");
        Ok(created)
    }

    pub async fn get(&self, id: &OwnerId) -> Result<Option<Owner>, DomainError> {
        self.owners.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<Owner>, DomainError> {
        self.owners.list().await
    }

    /// Delete an owner and every key, set, plan and audit entry it owns
    pub async fn delete(&self, id: &OwnerId) -> Result<(), DomainError> {
        if !self.owners.exists(id).await? {
            return Err(DomainError::not_found(format!("Owner '{}' not found", id)));
        }

        let keys = self.keys.delete_by_owner(id).await?;
        let sets = self.sets.delete_by_owner(id).await?;
        let plans = self.plans.delete_by_owner(id).await?;
        let audit = self.audit.delete_by_owner(id).await?;
        self.owners.delete(id).await?;

        info!(
            owner_id = %id,
            keys,
            sets,
            plans,
            audit_entries = audit,
            "Owner deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workout::{ExerciseName, SetRecord};
    use crate::infrastructure::api_key::{InMemoryApiKeyRepository, KeyStore};
    use crate::infrastructure::audit::InMemoryAuditRepository;
    use crate::infrastructure::owner::InMemoryOwnerRepository;
    use crate::infrastructure::workout::{InMemoryPlanRepository, InMemorySetRecordRepository};
    use chrono::Utc;

    struct Fixture {
        service: OwnerService,
        keys: KeyStore,
        sets: Arc<InMemorySetRecordRepository>,
    }

    fn fixture() -> Fixture {
        let owners = Arc::new(InMemoryOwnerRepository::new());
        let key_repo = Arc::new(InMemoryApiKeyRepository::new());
        let sets = Arc::new(InMemorySetRecordRepository::new());

        let service = OwnerService::new(
            owners.clone(),
            key_repo.clone(),
            sets.clone(),
            Arc::new(InMemoryPlanRepository::new()),
            Arc::new(InMemoryAuditRepository::new()),
        );

        Fixture {
            service,
            keys: KeyStore::new(key_repo, owners),
            sets,
        }
    }

    #[tokio::test]
    async fn test_create_with_and_without_id() {
        let f = fixture();

        let named = f.service.create(Some("alice"), " Alice ").await.unwrap();
        assert_eq!(named.id().as_str(), "alice");
        assert_eq!(named.name(), "Alice");

        let generated = f.service.create(None, "Bob").await.unwrap();
        assert!(generated.id().as_str().starts_with("own-"));

        assert_eq!(f.service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let f = fixture();

        let bad_id = f.service.create(Some("-bad-"), "X").await.unwrap_err();
        assert!(matches!(bad_id, DomainError::Validation { .. }));

        let bad_name = f.service.create(Some("alice"), "  ").await.unwrap_err();
        assert!(matches!(bad_name, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let f = fixture();
        let alice = f.service.create(Some("alice"), "Alice").await.unwrap();
        let created = f.keys.create_key(alice.id(), "Phone").await.unwrap();
        f.sets
            .create(
                SetRecord::new(
                    alice.id().clone(),
                    ExerciseName::parse("squat").unwrap(),
                    100.0,
                    5,
                    Utc::now(),
                )
                .unwrap(),
            )
            .await
            .unwrap();

        f.service.delete(alice.id()).await.unwrap();

        assert!(f.service.get(alice.id()).await.unwrap().is_none());
        assert!(f.keys.resolve(&created.secret).await.is_err());
        assert!(f.sets.list_all().await.unwrap().is_empty());

        let again = f.service.delete(alice.id()).await.unwrap_err();
        assert!(matches!(again, DomainError::NotFound { .. }));
    }
}
