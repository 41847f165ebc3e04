//! Exercise names: normalization and fuzzy matching

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Normalize an exercise name for storage and lookup: trim and lower-case.
pub fn normalize_exercise(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A normalized, non-empty exercise name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseName(String);

impl ExerciseName {
    /// Normalize and validate a raw exercise name
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = normalize_exercise(raw);

        if normalized.is_empty() {
            return Err(DomainError::validation("exercise name cannot be empty"));
        }

        Ok(Self(normalized))
    }

    /// Wrap a value read back from storage, which is already normalized
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last whitespace-delimited token, used as the fuzzy search needle
    pub fn search_token(&self) -> &str {
        self.0.split_whitespace().last().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ExerciseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of the fallback search run after an exact-name miss
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuzzyMatch {
    /// Known exercises containing the query's last token
    Suggestions(Vec<String>),
    /// Nothing matched; every exercise the owner has logged
    Available(Vec<String>),
}

impl FuzzyMatch {
    /// Match `query` against an owner's distinct exercise names.
    ///
    /// Output lists are sorted and deduplicated regardless of input order.
    pub fn search(query: &ExerciseName, known: &[String]) -> Self {
        let mut known: Vec<String> = known.to_vec();
        known.sort();
        known.dedup();

        let needle = query.search_token();
        let suggestions: Vec<String> = known
            .iter()
            .filter(|name| name.contains(needle))
            .cloned()
            .collect();

        if suggestions.is_empty() {
            Self::Available(known)
        } else {
            Self::Suggestions(suggestions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_exercise("  Bench Press "), "bench press");
        assert_eq!(normalize_exercise("BENCH PRESS"), "bench press");
        assert_eq!(
            ExerciseName::parse("\tSquat\n").unwrap().as_str(),
            "squat"
        );
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = ExerciseName::parse("   ").unwrap_err();
        assert_eq!(err.kind(), "validation_error");
    }

    #[test]
    fn test_search_token_is_last_word() {
        let name = ExerciseName::parse("incline dumbbell press").unwrap();
        assert_eq!(name.search_token(), "press");

        let single = ExerciseName::parse("squat").unwrap();
        assert_eq!(single.search_token(), "squat");
    }

    #[test]
    fn test_fuzzy_suggestions() {
        let known = vec![
            "overhead press".to_string(),
            "bench press".to_string(),
            "squat".to_string(),
        ];
        let query = ExerciseName::parse("Incline Press").unwrap();

        assert_eq!(
            FuzzyMatch::search(&query, &known),
            FuzzyMatch::Suggestions(vec![
                "bench press".to_string(),
                "overhead press".to_string()
            ])
        );
    }

    #[test]
    fn test_fuzzy_falls_back_to_available() {
        let known = vec!["squat".to_string(), "deadlift".to_string()];
        let query = ExerciseName::parse("curl").unwrap();

        assert_eq!(
            FuzzyMatch::search(&query, &known),
            FuzzyMatch::Available(vec!["deadlift".to_string(), "squat".to_string()])
        );
    }

    #[test]
    fn test_fuzzy_with_no_history() {
        let query = ExerciseName::parse("curl").unwrap();
        assert_eq!(FuzzyMatch::search(&query, &[]), FuzzyMatch::Available(vec![]));
    }
}
