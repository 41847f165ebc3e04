//! In-memory set record and plan repositories

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::owner::OwnerId;
use crate::domain::workout::{
    ExerciseName, PlanRecord, PlanRepository, SetRecord, SetRecordId, SetRecordRepository,
};
use crate::domain::DomainError;

/// In-memory implementation of SetRecordRepository
#[derive(Debug, Default)]
pub struct InMemorySetRecordRepository {
    records: Arc<RwLock<HashMap<SetRecordId, SetRecord>>>,
}

impl InMemorySetRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn newest(
        &self,
        limit: usize,
        filter: impl Fn(&SetRecord) -> bool,
    ) -> Vec<SetRecord> {
        let records = self.records.read().await;

        let mut matching: Vec<SetRecord> = records.values().filter(|&r| filter(r)).cloned().collect();
        matching.sort_by(SetRecord::recency_cmp);
        matching.truncate(limit);
        matching
    }
}

#[async_trait]
impl SetRecordRepository for InMemorySetRecordRepository {
    async fn create(&self, record: SetRecord) -> Result<SetRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(record.id()) {
            return Err(DomainError::conflict(format!(
                "Set record '{}' already exists",
                record.id()
            )));
        }

        records.insert(record.id().clone(), record.clone());
        Ok(record)
    }

    async fn latest_for_exercise(
        &self,
        owner_id: &OwnerId,
        exercise: &ExerciseName,
        limit: usize,
    ) -> Result<Vec<SetRecord>, DomainError> {
        Ok(self
            .newest(limit, |r| r.owner_id() == owner_id && r.exercise() == exercise)
            .await)
    }

    async fn latest(&self, owner_id: &OwnerId, limit: usize) -> Result<Vec<SetRecord>, DomainError> {
        Ok(self.newest(limit, |r| r.owner_id() == owner_id).await)
    }

    async fn delete(&self, owner_id: &OwnerId, id: &SetRecordId) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        match records.get(id) {
            Some(record) if record.owner_id() == owner_id => {
                records.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn distinct_exercises(&self, owner_id: &OwnerId) -> Result<Vec<String>, DomainError> {
        let records = self.records.read().await;

        let names: BTreeSet<&str> = records
            .values()
            .filter(|r| r.owner_id() == owner_id)
            .map(|r| r.exercise().as_str())
            .collect();

        Ok(names.into_iter().map(str::to_string).collect())
    }

    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<SetRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.owner_id() == owner_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<SetRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| r.owner_id() != owner_id);
        Ok(before - records.len())
    }
}

/// In-memory implementation of PlanRepository
#[derive(Debug, Default)]
pub struct InMemoryPlanRepository {
    plans: Arc<RwLock<Vec<PlanRecord>>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn create(&self, plan: PlanRecord) -> Result<PlanRecord, DomainError> {
        let mut plans = self.plans.write().await;

        if plans.iter().any(|p| p.id() == plan.id()) {
            return Err(DomainError::conflict(format!(
                "Plan '{}' already exists",
                plan.id()
            )));
        }

        plans.push(plan.clone());
        Ok(plan)
    }

    async fn list_by_owner(
        &self,
        owner_id: &OwnerId,
        limit: usize,
    ) -> Result<Vec<PlanRecord>, DomainError> {
        let plans = self.plans.read().await;

        let mut owned: Vec<PlanRecord> = plans
            .iter()
            .filter(|p| p.owner_id() == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(a.id()))
        });
        owned.truncate(limit);

        Ok(owned)
    }

    async fn count_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans.iter().filter(|p| p.owner_id() == owner_id).count())
    }

    async fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, DomainError> {
        let mut plans = self.plans.write().await;
        let before = plans.len();
        plans.retain(|p| p.owner_id() != owner_id);
        Ok(before - plans.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workout::ExerciseSpec;
    use chrono::{Duration, Utc};

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id).unwrap()
    }

    fn set(owner_id: &str, exercise: &str, weight: f64, minutes_ago: i64) -> SetRecord {
        SetRecord::new(
            owner(owner_id),
            ExerciseName::parse(exercise).unwrap(),
            weight,
            5,
            Utc::now() - Duration::minutes(minutes_ago),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_latest_for_exercise_is_ordered_and_scoped() {
        let repo = InMemorySetRecordRepository::new();
        repo.create(set("alice", "squat", 100.0, 30)).await.unwrap();
        repo.create(set("alice", "squat", 110.0, 10)).await.unwrap();
        repo.create(set("alice", "squat", 105.0, 20)).await.unwrap();
        repo.create(set("alice", "bench press", 80.0, 1)).await.unwrap();
        repo.create(set("bob", "squat", 200.0, 0)).await.unwrap();

        let squat = ExerciseName::parse("squat").unwrap();
        let latest = repo
            .latest_for_exercise(&owner("alice"), &squat, 2)
            .await
            .unwrap();

        let weights: Vec<f64> = latest.iter().map(|r| r.weight()).collect();
        assert_eq!(weights, vec![110.0, 105.0]);
    }

    #[tokio::test]
    async fn test_latest_across_exercises() {
        let repo = InMemorySetRecordRepository::new();
        repo.create(set("alice", "squat", 100.0, 30)).await.unwrap();
        repo.create(set("alice", "bench press", 80.0, 1)).await.unwrap();

        let latest = repo.latest(&owner("alice"), 10).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].exercise().as_str(), "bench press");
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped() {
        let repo = InMemorySetRecordRepository::new();
        let record = repo.create(set("alice", "squat", 100.0, 0)).await.unwrap();

        assert!(!repo.delete(&owner("bob"), record.id()).await.unwrap());
        assert!(repo.delete(&owner("alice"), record.id()).await.unwrap());
        assert!(!repo.delete(&owner("alice"), record.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_distinct_exercises_sorted() {
        let repo = InMemorySetRecordRepository::new();
        repo.create(set("alice", "squat", 100.0, 3)).await.unwrap();
        repo.create(set("alice", "bench press", 80.0, 2)).await.unwrap();
        repo.create(set("alice", "squat", 100.0, 1)).await.unwrap();
        repo.create(set("bob", "curl", 20.0, 1)).await.unwrap();

        assert_eq!(
            repo.distinct_exercises(&owner("alice")).await.unwrap(),
            vec!["bench press".to_string(), "squat".to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let repo = InMemorySetRecordRepository::new();
        repo.create(set("alice", "squat", 100.0, 3)).await.unwrap();
        repo.create(set("bob", "squat", 100.0, 3)).await.unwrap();

        assert_eq!(repo.delete_by_owner(&owner("alice")).await.unwrap(), 1);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_plans_newest_first() {
        let repo = InMemoryPlanRepository::new();
        let specs = || {
            vec![ExerciseSpec::new(ExerciseName::parse("squat").unwrap(), 3, 5, 100.0).unwrap()]
        };

        let first = PlanRecord::new(owner("alice"), "A", specs(), None).unwrap();
        let second = PlanRecord::restore(
            crate::domain::workout::PlanRecordId::generate(),
            owner("alice"),
            "B".to_string(),
            None,
            specs(),
            first.created_at() + Duration::seconds(5),
        );
        repo.create(first).await.unwrap();
        repo.create(second).await.unwrap();
        repo.create(PlanRecord::new(owner("bob"), "C", specs(), None).unwrap())
            .await
            .unwrap();

        let plans = repo.list_by_owner(&owner("alice"), 5).await.unwrap();
        let names: Vec<&str> = plans.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(repo.count_by_owner(&owner("alice")).await.unwrap(), 2);
        assert_eq!(repo.list_by_owner(&owner("alice"), 1).await.unwrap().len(), 1);
    }
}
