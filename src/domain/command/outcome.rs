//! Structured command result

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::workout::FuzzyMatch;
use crate::domain::DomainError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// What every command returns to its caller. Absent fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Machine-readable error kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_exercises: Option<Vec<String>>,
}

impl CommandOutcome {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            suggestions: None,
            available_exercises: None,
        }
    }

    pub fn failure(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(kind.into()),
            suggestions: None,
            available_exercises: None,
        }
    }

    /// Failure for an exercise lookup that missed, carrying the fallback result
    pub fn exercise_not_found(message: impl Into<String>, fuzzy: FuzzyMatch) -> Self {
        let mut outcome = Self::failure("not_found", message);
        match fuzzy {
            FuzzyMatch::Suggestions(names) => outcome.suggestions = Some(names),
            FuzzyMatch::Available(names) => outcome.available_exercises = Some(names),
        }
        outcome
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Label used for metrics and audit: `"success"` or the error kind
    pub fn outcome_label(&self) -> &str {
        if self.success {
            "success"
        } else {
            self.error.as_deref().unwrap_or("internal_error")
        }
    }
}

impl From<DomainError> for CommandOutcome {
    /// Adapter errors are reduced to a generic message; details stay in logs
    fn from(err: DomainError) -> Self {
        if err.is_internal() {
            Self::failure(err.kind(), INTERNAL_MESSAGE)
        } else {
            Self::failure(err.kind(), err.message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serialization_omits_absent_fields() {
        let outcome = CommandOutcome::success(json!({"reps": 8}));
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value, json!({"success": true, "data": {"reps": 8}}));
    }

    #[test]
    fn test_from_domain_error() {
        let outcome: CommandOutcome = DomainError::validation("reps must be greater than 0").into();

        assert!(!outcome.is_success());
        assert_eq!(outcome.error.as_deref(), Some("validation_error"));
        assert_eq!(outcome.message.as_deref(), Some("reps must be greater than 0"));
    }

    #[test]
    fn test_storage_errors_are_masked() {
        let outcome: CommandOutcome =
            DomainError::storage("connection refused at 10.0.0.3:5432").into();

        assert_eq!(outcome.error.as_deref(), Some("internal_error"));
        assert_eq!(outcome.message.as_deref(), Some(INTERNAL_MESSAGE));
    }

    #[test]
    fn test_exercise_not_found_variants() {
        let with_suggestions = CommandOutcome::exercise_not_found(
            "No sets found",
            FuzzyMatch::Suggestions(vec!["bench press".to_string()]),
        );
        assert_eq!(
            with_suggestions.suggestions,
            Some(vec!["bench press".to_string()])
        );
        assert!(with_suggestions.available_exercises.is_none());

        let available = CommandOutcome::exercise_not_found("No sets found", FuzzyMatch::Available(vec![]));
        assert_eq!(available.available_exercises, Some(vec![]));
        assert_eq!(available.outcome_label(), "not_found");
    }
}
