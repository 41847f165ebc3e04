//! Typed command arguments
//!
//! Callers submit loosely typed JSON. Everything is coerced here, at the
//! boundary, so handlers only ever see validated values: numbers may arrive
//! as JSON numbers or numeric strings, limits never fail, and timestamps go
//! through [`parse_timestamp`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::workout::{parse_timestamp, ExerciseName, ExerciseSpec, LimitRange};
use crate::domain::DomainError;

/// View of the submitted arguments as a JSON object
#[derive(Debug, Clone, Copy)]
struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    fn of(args: &'a Value) -> Result<Self, DomainError> {
        match args {
            Value::Object(map) => Ok(Self { map: Some(map) }),
            Value::Null => Ok(Self { map: None }),
            _ => Err(DomainError::validation("arguments must be a JSON object")),
        }
    }

    /// A present, non-null field
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map
            .and_then(|map| map.get(key))
            .filter(|value| !value.is_null())
    }

    fn require(&self, key: &str) -> Result<&'a Value, DomainError> {
        self.get(key)
            .ok_or_else(|| DomainError::validation(format!("missing required field '{}'", key)))
    }

    fn require_str(&self, key: &str) -> Result<&'a str, DomainError> {
        self.require(key)?
            .as_str()
            .ok_or_else(|| DomainError::validation(format!("'{}' must be a string", key)))
    }

    fn optional_str(&self, key: &str) -> Result<Option<&'a str>, DomainError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(DomainError::validation(format!(
                "'{}' must be a string",
                key
            ))),
        }
    }

    fn exercise(&self) -> Result<ExerciseName, DomainError> {
        ExerciseName::parse(self.require_str("exercise")?)
    }

    fn timestamp(&self, keys: &[&str]) -> Result<Option<DateTime<Utc>>, DomainError> {
        for key in keys {
            if let Some(raw) = self.optional_str(key)? {
                return parse_timestamp(raw).map(Some);
            }
        }
        Ok(None)
    }

    fn limit(&self, range: LimitRange) -> usize {
        range.clamp(self.get("limit").and_then(lenient_integer))
    }
}

/// Coerce a number or numeric string into `f64`
pub fn coerce_f64(value: &Value, field: &str) -> Result<f64, DomainError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| DomainError::validation(format!("'{}' must be a number", field)))
}

/// Coerce a number or numeric string into a strictly positive whole count
pub fn coerce_count(value: &Value, field: &str) -> Result<u32, DomainError> {
    let number = coerce_f64(value, field)?;

    if number.fract() != 0.0 {
        return Err(DomainError::validation(format!(
            "'{}' must be a whole number, got {}",
            field, number
        )));
    }

    if number <= 0.0 {
        return Err(DomainError::validation(format!(
            "'{}' must be greater than 0",
            field
        )));
    }

    if number > f64::from(u32::MAX) {
        return Err(DomainError::validation(format!("'{}' is too large", field)));
    }

    Ok(number as u32)
}

/// Best-effort integer reading for limits; anything unusable is `None`
fn lenient_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

/// `log_set`
#[derive(Debug, Clone, PartialEq)]
pub struct LogSetArgs {
    pub exercise: ExerciseName,
    pub weight: f64,
    pub reps: u32,
    pub occurred_at: Option<DateTime<Utc>>,
}

impl LogSetArgs {
    pub fn from_value(args: &Value) -> Result<Self, DomainError> {
        let fields = Fields::of(args)?;

        Ok(Self {
            exercise: fields.exercise()?,
            weight: coerce_f64(fields.require("weight")?, "weight")?,
            reps: coerce_count(fields.require("reps")?, "reps")?,
            occurred_at: fields.timestamp(&["timestamp"])?,
        })
    }
}

/// `get_last_set` and `delete_last_set`
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseArgs {
    pub exercise: ExerciseName,
}

impl ExerciseArgs {
    pub fn from_value(args: &Value) -> Result<Self, DomainError> {
        Ok(Self {
            exercise: Fields::of(args)?.exercise()?,
        })
    }
}

/// `get_last_sets`
#[derive(Debug, Clone, PartialEq)]
pub struct LastSetsArgs {
    pub exercise: ExerciseName,
    pub limit: usize,
}

impl LastSetsArgs {
    pub fn from_value(args: &Value, range: LimitRange) -> Result<Self, DomainError> {
        let fields = Fields::of(args)?;

        Ok(Self {
            exercise: fields.exercise()?,
            limit: fields.limit(range),
        })
    }
}

/// Commands whose only argument is an optional `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitArgs {
    pub limit: usize,
}

impl LimitArgs {
    pub fn from_value(args: &Value, range: LimitRange) -> Result<Self, DomainError> {
        Ok(Self {
            limit: Fields::of(args)?.limit(range),
        })
    }
}

/// `assign_workout`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignWorkoutArgs {
    pub name: String,
    pub exercises: Vec<ExerciseSpec>,
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl AssignWorkoutArgs {
    pub fn from_value(args: &Value) -> Result<Self, DomainError> {
        let fields = Fields::of(args)?;

        let name = fields.require_str("name")?.trim();
        if name.is_empty() {
            return Err(DomainError::validation("workout name cannot be empty"));
        }

        let items = match fields.require("exercises")? {
            Value::Array(items) if !items.is_empty() => items,
            _ => {
                return Err(DomainError::validation(
                    "exercises must be a non-empty list",
                ))
            }
        };

        let exercises = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                exercise_spec(item).map_err(|e| {
                    DomainError::validation(format!("exercises[{}]: {}", index, e.message()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let scheduled_for = fields.timestamp(&["scheduled_for", "scheduledFor"])?;

        Ok(Self {
            name: name.to_string(),
            exercises,
            scheduled_for,
        })
    }
}

fn exercise_spec(item: &Value) -> Result<ExerciseSpec, DomainError> {
    let fields = match item {
        Value::Object(_) => Fields::of(item)?,
        _ => return Err(DomainError::validation("item must be an object")),
    };

    let name = ExerciseName::parse(fields.require_str("name")?)?;
    let sets = coerce_count(fields.require("sets")?, "sets")?;
    let reps = coerce_count(fields.require("reps")?, "reps")?;
    let weight = coerce_f64(fields.require("weight")?, "weight")?;

    ExerciseSpec::new(name, sets, reps, weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workout::limits::{LAST_SETS_LIMIT, RECENT_SETS_LIMIT};
    use serde_json::json;

    #[test]
    fn test_log_set_coerces_numeric_strings() {
        let args = LogSetArgs::from_value(&json!({
            "exercise": " Bench Press ",
            "weight": "135.5",
            "reps": "8"
        }))
        .unwrap();

        assert_eq!(args.exercise.as_str(), "bench press");
        assert_eq!(args.weight, 135.5);
        assert_eq!(args.reps, 8);
        assert!(args.occurred_at.is_none());
    }

    #[test]
    fn test_log_set_rejects_fractional_reps() {
        let err = LogSetArgs::from_value(&json!({
            "exercise": "squat",
            "weight": 100,
            "reps": 2.5
        }))
        .unwrap_err();
        assert_eq!(err.kind(), "validation_error");
    }

    #[test]
    fn test_log_set_accepts_whole_float_reps() {
        let args = LogSetArgs::from_value(&json!({
            "exercise": "squat",
            "weight": 100,
            "reps": 5.0
        }))
        .unwrap();
        assert_eq!(args.reps, 5);
    }

    #[test]
    fn test_log_set_missing_and_malformed_fields() {
        let missing = LogSetArgs::from_value(&json!({"exercise": "squat", "reps": 5})).unwrap_err();
        assert!(missing.message().contains("weight"));

        let garbage =
            LogSetArgs::from_value(&json!({"exercise": "squat", "weight": "heavy", "reps": 5}))
                .unwrap_err();
        assert_eq!(garbage.kind(), "validation_error");

        let not_object = LogSetArgs::from_value(&json!([1, 2])).unwrap_err();
        assert_eq!(not_object.kind(), "validation_error");
    }

    #[test]
    fn test_log_set_bad_timestamp() {
        let err = LogSetArgs::from_value(&json!({
            "exercise": "squat",
            "weight": 100,
            "reps": 5,
            "timestamp": "yesterday-ish"
        }))
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_timestamp");
    }

    #[test]
    fn test_limits_never_fail() {
        let parse = |v: Value| LimitArgs::from_value(&v, RECENT_SETS_LIMIT).unwrap().limit;

        assert_eq!(parse(json!({})), 10);
        assert_eq!(parse(Value::Null), 10);
        assert_eq!(parse(json!({"limit": 0})), 10);
        assert_eq!(parse(json!({"limit": 1000})), 50);
        assert_eq!(parse(json!({"limit": "3"})), 3);
        assert_eq!(parse(json!({"limit": "lots"})), 10);
        assert_eq!(parse(json!({"limit": true})), 10);
    }

    #[test]
    fn test_last_sets_requires_exercise() {
        let err = LastSetsArgs::from_value(&json!({"limit": 3}), LAST_SETS_LIMIT).unwrap_err();
        assert!(err.message().contains("exercise"));
    }

    #[test]
    fn test_assign_workout_parses_items() {
        let args = AssignWorkoutArgs::from_value(&json!({
            "name": "Leg Day",
            "scheduledFor": "2024-03-01",
            "exercises": [
                {"name": "Squat", "sets": 5, "reps": "5", "weight": "225"},
                {"name": "lunge", "sets": "3", "reps": 12, "weight": 0}
            ]
        }))
        .unwrap();

        assert_eq!(args.name, "Leg Day");
        assert_eq!(args.exercises.len(), 2);
        assert_eq!(args.exercises[0].name.as_str(), "squat");
        assert_eq!(args.exercises[0].weight, 225.0);
        assert!(args.scheduled_for.is_some());
    }

    #[test]
    fn test_assign_workout_names_the_bad_item() {
        let err = AssignWorkoutArgs::from_value(&json!({
            "name": "Leg Day",
            "exercises": [
                {"name": "squat", "sets": 5, "reps": 5, "weight": 225},
                {"name": "lunge", "sets": 3, "reps": 12}
            ]
        }))
        .unwrap_err();

        assert_eq!(err.kind(), "validation_error");
        assert!(err.message().starts_with("exercises[1]"));
        assert!(err.message().contains("weight"));
    }

    #[test]
    fn test_assign_workout_rejects_empty_list_and_name() {
        let empty = AssignWorkoutArgs::from_value(&json!({"name": "x", "exercises": []}));
        assert!(empty.is_err());

        let blank = AssignWorkoutArgs::from_value(&json!({
            "name": "  ",
            "exercises": [{"name": "squat", "sets": 1, "reps": 1, "weight": 1}]
        }));
        assert!(blank.is_err());
    }

    #[test]
    fn test_assign_workout_bad_schedule() {
        let err = AssignWorkoutArgs::from_value(&json!({
            "name": "Leg Day",
            "scheduled_for": "not-a-date",
            "exercises": [{"name": "squat", "sets": 5, "reps": 5, "weight": 225}]
        }))
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_timestamp");
    }
}
