//! Per-owner training statistics over a trailing window

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::round2;
use crate::domain::workout::{ExerciseName, SetRecord};

/// Headline numbers for a set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_sets: u64,
    /// Σ weight × reps
    pub total_weight_moved: f64,
    pub distinct_exercises: usize,
}

impl Totals {
    fn from_records<'a>(records: impl IntoIterator<Item = &'a SetRecord>) -> Self {
        let mut sets = 0;
        let mut moved = 0.0;
        let mut exercises = HashSet::new();

        for record in records {
            sets += 1;
            moved += record.volume();
            exercises.insert(record.exercise().as_str());
        }

        Self {
            total_sets: sets,
            total_weight_moved: round2(moved),
            distinct_exercises: exercises.len(),
        }
    }
}

/// Windowed figures for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseBreakdown {
    pub exercise: String,
    pub sets: u64,
    pub total_reps: u64,
    pub total_weight: f64,
    pub max_weight: f64,
    pub average_weight: f64,
    pub last_performed: DateTime<Utc>,
}

impl ExerciseBreakdown {
    fn start(record: &SetRecord) -> Self {
        Self {
            exercise: record.exercise().as_str().to_string(),
            sets: 0,
            total_reps: 0,
            total_weight: 0.0,
            max_weight: record.weight(),
            average_weight: 0.0,
            last_performed: record.occurred_at(),
        }
    }

    fn add_record(&mut self, record: &SetRecord) {
        // average_weight holds the running sum until finish()
        self.sets += 1;
        self.total_reps += u64::from(record.reps());
        self.total_weight += record.volume();
        self.average_weight += record.weight();
        self.max_weight = self.max_weight.max(record.weight());
        self.last_performed = self.last_performed.max(record.occurred_at());
    }

    fn finish(mut self) -> Self {
        self.average_weight = round2(self.average_weight / self.sets as f64);
        self.total_weight = round2(self.total_weight);
        self
    }
}

/// First-to-last weight change of a tracked lift within the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthProgress {
    pub exercise: String,
    pub first_weight: f64,
    pub last_weight: f64,
    pub change: f64,
    /// 0 when the first weight is 0
    pub change_percent: f64,
    pub sets: u64,
}

impl StrengthProgress {
    /// `records` must be the lift's windowed records; None when empty
    fn from_records(lift: &ExerciseName, mut records: Vec<&SetRecord>) -> Option<Self> {
        records.sort_by(|a, b| {
            a.occurred_at()
                .cmp(&b.occurred_at())
                .then_with(|| a.created_at().cmp(&b.created_at()))
        });

        let first = records.first()?.weight();
        let last = records.last()?.weight();
        let change = last - first;
        let change_percent = if first == 0.0 {
            0.0
        } else {
            round2(change / first * 100.0)
        };

        Some(Self {
            exercise: lift.as_str().to_string(),
            first_weight: first,
            last_weight: last,
            change: round2(change),
            change_percent,
            sets: records.len() as u64,
        })
    }
}

/// Everything the owner statistics view reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerStatistics {
    pub window_days: u32,
    pub all_time: Totals,
    pub window: Totals,
    /// Sorted by sets descending, then name
    pub exercises: Vec<ExerciseBreakdown>,
    pub strength_progress: Vec<StrengthProgress>,
    /// Whole days since the most recent record, if any; 0 when it lies in the future
    pub days_since_last_workout: Option<i64>,
}

/// Compute an owner's statistics.
///
/// A record is inside the window iff `occurred_at >= now - window_days`.
pub fn owner_statistics(
    records: &[SetRecord],
    now: DateTime<Utc>,
    window_days: u32,
    tracked_lifts: &[ExerciseName],
) -> OwnerStatistics {
    // Windows reaching past the calendar's lower bound include everything
    let window_start = Duration::try_days(i64::from(window_days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let windowed: Vec<&SetRecord> = records
        .iter()
        .filter(|r| r.occurred_at() >= window_start)
        .collect();

    let mut groups: BTreeMap<&str, ExerciseBreakdown> = BTreeMap::new();
    for record in &windowed {
        groups
            .entry(record.exercise().as_str())
            .or_insert_with(|| ExerciseBreakdown::start(record))
            .add_record(record);
    }

    let mut exercises: Vec<ExerciseBreakdown> =
        groups.into_values().map(ExerciseBreakdown::finish).collect();
    exercises.sort_by(|a, b| b.sets.cmp(&a.sets).then_with(|| a.exercise.cmp(&b.exercise)));

    let strength_progress = tracked_lifts
        .iter()
        .filter_map(|lift| {
            let lift_records = windowed
                .iter()
                .copied()
                .filter(|r| r.exercise() == lift)
                .collect();
            StrengthProgress::from_records(lift, lift_records)
        })
        .collect();

    let days_since_last_workout = records
        .iter()
        .map(|r| r.occurred_at())
        .max()
        .map(|last| (now - last).num_days().max(0));

    OwnerStatistics {
        window_days,
        all_time: Totals::from_records(records),
        window: Totals::from_records(windowed.iter().copied()),
        exercises,
        strength_progress,
        days_since_last_workout,
    }
}
