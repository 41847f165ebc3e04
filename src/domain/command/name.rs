//! Command names as they appear on the wire

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Every command the dispatcher knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandName {
    LogSet,
    GetLastSet,
    GetLastSets,
    GetRecentSets,
    DeleteLastSet,
    AssignWorkout,
    ListWorkouts,
}

impl CommandName {
    pub const ALL: [CommandName; 7] = [
        Self::LogSet,
        Self::GetLastSet,
        Self::GetLastSets,
        Self::GetRecentSets,
        Self::DeleteLastSet,
        Self::AssignWorkout,
        Self::ListWorkouts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogSet => "log_set",
            Self::GetLastSet => "get_last_set",
            Self::GetLastSets => "get_last_sets",
            Self::GetRecentSets => "get_recent_sets",
            Self::DeleteLastSet => "delete_last_set",
            Self::AssignWorkout => "assign_workout",
            Self::ListWorkouts => "list_workouts",
        }
    }

    /// Whether the command writes owner data
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::LogSet | Self::DeleteLastSet | Self::AssignWorkout
        )
    }
}

impl FromStr for CommandName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == trimmed)
            .ok_or_else(|| DomainError::validation(format!("Unknown command: '{}'", trimmed)))
    }
}

impl std::fmt::Display for CommandName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for name in CommandName::ALL {
            assert_eq!(name.as_str().parse::<CommandName>().unwrap(), name);
        }
    }

    #[test]
    fn test_unknown_name_is_validation_error() {
        let err = "drop_tables".parse::<CommandName>().unwrap_err();
        assert_eq!(err.kind(), "validation_error");
        assert!(err.message().contains("drop_tables"));
    }

    #[test]
    fn test_serde_matches_wire_name() {
        let json = serde_json::to_string(&CommandName::AssignWorkout).unwrap();
        assert_eq!(json, "\"assign_workout\"");
    }

    #[test]
    fn test_mutations() {
        let writes: Vec<CommandName> = CommandName::ALL
            .into_iter()
            .filter(CommandName::is_mutation)
            .collect();

        assert_eq!(
            writes,
            vec![
                CommandName::LogSet,
                CommandName::DeleteLastSet,
                CommandName::AssignWorkout
            ]
        );
    }
}
