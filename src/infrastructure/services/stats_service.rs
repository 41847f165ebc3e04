//! Stats service - read-only aggregate views
//!
//! Popularity spans every owner and exposes no owner identifiers; owner
//! statistics only ever read the caller's own records.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument};

use crate::domain::stats::{exercise_popularity, owner_statistics, ExercisePopularity, OwnerStatistics};
use crate::domain::workout::{ExerciseName, SetRecordRepository};
use crate::domain::DomainError;
use crate::infrastructure::api_key::KeyStore;

/// Default statistics window in days
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Lifts reported in strength progress unless configured otherwise
pub const DEFAULT_TRACKED_LIFTS: &[&str] = &[
    "bench press",
    "squat",
    "deadlift",
    "overhead press",
    "barbell row",
];

/// Computes popularity and per-owner statistics
pub struct StatsService {
    key_store: Arc<KeyStore>,
    sets: Arc<dyn SetRecordRepository>,
    window_days: u32,
    tracked_lifts: Vec<ExerciseName>,
}

impl std::fmt::Debug for StatsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsService")
            .field("window_days", &self.window_days)
            .field("tracked_lifts", &self.tracked_lifts)
            .finish_non_exhaustive()
    }
}

impl StatsService {
    pub fn new(key_store: Arc<KeyStore>, sets: Arc<dyn SetRecordRepository>) -> Self {
        Self {
            key_store,
            sets,
            window_days: DEFAULT_WINDOW_DAYS,
            tracked_lifts: DEFAULT_TRACKED_LIFTS
                .iter()
                .map(|name| ExerciseName::from_stored(*name))
                .collect(),
        }
    }

    /// Window used when the caller does not ask for one; zero keeps the default
    pub fn with_window_days(mut self, days: u32) -> Self {
        if days > 0 {
            self.window_days = days;
        }
        self
    }

    /// Replace the tracked lifts; names are normalized and blanks dropped
    pub fn with_tracked_lifts<I, S>(mut self, lifts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tracked: Vec<ExerciseName> = Vec::new();
        for lift in lifts {
            if let Ok(name) = ExerciseName::parse(lift.as_ref()) {
                if !tracked.contains(&name) {
                    tracked.push(name);
                }
            }
        }
        self.tracked_lifts = tracked;
        self
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Exercise popularity across all owners
    #[instrument(skip(self, secret))]
    pub async fn exercise_popularity(
        &self,
        secret: &str,
    ) -> Result<Vec<ExercisePopularity>, DomainError> {
        self.key_store.resolve(secret).await?;

        let records = self.sets.list_all().await?;
        let popularity = exercise_popularity(&records);

        debug!(records = records.len(), exercises = popularity.len(), "Computed popularity");
        Ok(popularity)
    }

    /// The caller's own statistics over the last `days` days
    #[instrument(skip(self, secret))]
    pub async fn owner_statistics(
        &self,
        secret: &str,
        days: Option<u32>,
    ) -> Result<OwnerStatistics, DomainError> {
        let caller = self.key_store.resolve(secret).await?;
        let window_days = days.filter(|d| *d > 0).unwrap_or(self.window_days);

        let records = self.sets.list_by_owner(caller.owner.id()).await?;
        let stats = owner_statistics(&records, Utc::now(), window_days, &self.tracked_lifts);

        debug!(
            owner_id = %caller.owner.id(),
            records = records.len(),
            window_days,
            "Computed owner statistics"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::owner::{Owner, OwnerId, OwnerRepository};
    use crate::domain::workout::SetRecord;
    use crate::infrastructure::api_key::InMemoryApiKeyRepository;
    use crate::infrastructure::owner::InMemoryOwnerRepository;
    use crate::infrastructure::workout::InMemorySetRecordRepository;
    use chrono::Duration;

    struct Fixture {
        service: StatsService,
        sets: Arc<InMemorySetRecordRepository>,
        alice_secret: String,
    }

    async fn fixture() -> Fixture {
        let owners = Arc::new(InMemoryOwnerRepository::new());
        for id in ["alice", "bob"] {
            owners
                .create(Owner::new(OwnerId::new(id).unwrap(), id).unwrap())
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

        let sets = Arc::new(InMemorySetRecordRepository::new());
        Fixture {
            service: StatsService::new(store, sets.clone()),
            sets,
            alice_secret: alice.secret,
        }
    }

    async fn add(f: &Fixture, owner: &str, exercise: &str, weight: f64, days_ago: i64) {
        f.sets
            .create(
                SetRecord::new(
                    OwnerId::new(owner).unwrap(),
                    ExerciseName::parse(exercise).unwrap(),
                    weight,
                    5,
                    Utc::now() - Duration::days(days_ago),
                )
                .unwrap(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_popularity_spans_owners() {
        let f = fixture().await;
        add(&f, "alice", "squat", 100.0, 1).await;
        add(&f, "bob", "squat", 120.0, 1).await;
        add(&f, "bob", "deadlift", 200.0, 1).await;

        let popularity = f.service.exercise_popularity(&f.alice_secret).await.unwrap();

        assert_eq!(popularity[0].exercise, "squat");
        assert_eq!(popularity[0].rank, 1);
        assert_eq!(popularity[0].unique_owners, 2);
        assert_eq!(popularity[1].exercise, "deadlift");
    }

    #[tokio::test]
    async fn test_owner_statistics_are_scoped_and_windowed() {
        let f = fixture().await;
        add(&f, "alice", "squat", 100.0, 40).await;
        add(&f, "alice", "squat", 120.0, 2).await;
        add(&f, "bob", "squat", 500.0, 1).await;

        let default = f
            .service
            .owner_statistics(&f.alice_secret, None)
            .await
            .unwrap();
        assert_eq!(default.window_days, 30);
        assert_eq!(default.all_time.total_sets, 2);
        assert_eq!(default.window.total_sets, 1);
        assert_eq!(default.exercises[0].max_weight, 120.0);
        assert_eq!(default.days_since_last_workout, Some(2));

        let wide = f
            .service
            .owner_statistics(&f.alice_secret, Some(60))
            .await
            .unwrap();
        assert_eq!(wide.window.total_sets, 2);
        assert_eq!(wide.strength_progress.len(), 1);
        assert_eq!(wide.strength_progress[0].change, 20.0);

        let zero = f
            .service
            .owner_statistics(&f.alice_secret, Some(0))
            .await
            .unwrap();
        assert_eq!(zero.window_days, 30);
    }

    #[tokio::test]
    async fn test_unbounded_window_request() {
        let f = fixture().await;
        add(&f, "alice", "squat", 100.0, 365 * 50).await;

        let stats = f
            .service
            .owner_statistics(&f.alice_secret, Some(u32::MAX))
            .await
            .unwrap();

        assert_eq!(stats.window_days, u32::MAX);
        assert_eq!(stats.window.total_sets, 1);
    }

    #[tokio::test]
    async fn test_requires_valid_key() {
        let f = fixture().await;

        let err = f.service.exercise_popularity("bogus").await.unwrap_err();
        assert_eq!(err.kind(), "authentication_required");

        let err = f.service.owner_statistics("", None).await.unwrap_err();
        assert_eq!(err.kind(), "authentication_required");
    }

    #[test]
    fn test_tracked_lift_configuration() {
        let store = Arc::new(KeyStore::new(
            Arc::new(InMemoryApiKeyRepository::new()),
            Arc::new(InMemoryOwnerRepository::new()),
        ));
        let service = StatsService::new(store, Arc::new(InMemorySetRecordRepository::new()))
            .with_window_days(0)
            .with_tracked_lifts(["Front Squat", "front squat", "  "]);

        assert_eq!(service.window_days(), DEFAULT_WINDOW_DAYS);
        assert_eq!(service.tracked_lifts.len(), 1);
        assert_eq!(service.tracked_lifts[0].as_str(), "front squat");
    }
}
