//! Aggregation engine
//!
//! Pure read-side computations over set records. Callers load the records;
//! nothing here touches storage.

mod owner_stats;
mod popularity;

pub use owner_stats::{
    owner_statistics, ExerciseBreakdown, OwnerStatistics, StrengthProgress, Totals,
};
pub use popularity::{exercise_popularity, ExercisePopularity};

/// Round to two decimals, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
