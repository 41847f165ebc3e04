//! Exercise popularity across all owners

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::round2;
use crate::domain::owner::OwnerId;
use crate::domain::workout::SetRecord;

/// One row of the popularity list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePopularity {
    /// 1-based, dense and distinct
    pub rank: usize,
    pub exercise: String,
    pub total_sets: u64,
    pub unique_owners: usize,
    pub average_weight: f64,
    pub max_weight: f64,
    pub last_performed: DateTime<Utc>,
}

#[derive(Debug)]
struct Accumulator<'a> {
    sets: u64,
    owners: HashSet<&'a OwnerId>,
    weight_sum: f64,
    max_weight: f64,
    last_performed: DateTime<Utc>,
}

impl<'a> Accumulator<'a> {
    fn start(record: &'a SetRecord) -> Self {
        Self {
            sets: 0,
            owners: HashSet::new(),
            weight_sum: 0.0,
            max_weight: record.weight(),
            last_performed: record.occurred_at(),
        }
    }

    fn add_record(&mut self, record: &'a SetRecord) {
        self.sets += 1;
        self.owners.insert(record.owner_id());
        self.weight_sum += record.weight();
        self.max_weight = self.max_weight.max(record.weight());
        self.last_performed = self.last_performed.max(record.occurred_at());
    }
}

/// Rank exercises by how often they were logged.
///
/// Ordered by set count descending, then exercise name ascending, so equal
/// counts still receive distinct, stable ranks.
pub fn exercise_popularity(records: &[SetRecord]) -> Vec<ExercisePopularity> {
    let mut groups: BTreeMap<&str, Accumulator<'_>> = BTreeMap::new();

    for record in records {
        groups
            .entry(record.exercise().as_str())
            .or_insert_with(|| Accumulator::start(record))
            .add_record(record);
    }

    let mut rows: Vec<ExercisePopularity> = groups
        .into_iter()
        .map(|(exercise, acc)| ExercisePopularity {
            rank: 0,
            exercise: exercise.to_string(),
            total_sets: acc.sets,
            unique_owners: acc.owners.len(),
            average_weight: round2(acc.weight_sum / acc.sets as f64),
            max_weight: acc.max_weight,
            last_performed: acc.last_performed,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_sets
            .cmp(&a.total_sets)
            .then_with(|| a.exercise.cmp(&b.exercise))
    });

    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index + 1;
    }

    rows
}
