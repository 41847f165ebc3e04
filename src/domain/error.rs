use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Authentication required: {message}")]
    AuthenticationRequired { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid timestamp: {message}")]
    InvalidTimestamp { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::AuthenticationRequired {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_timestamp(message: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Machine-readable kind used in command outcomes and audit entries
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired { .. } => "authentication_required",
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation_error",
            Self::InvalidTimestamp { .. } => "invalid_timestamp",
            Self::Conflict { .. } => "conflict",
            Self::Storage { .. } | Self::Internal { .. } => "internal_error",
        }
    }

    /// The human-readable message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::AuthenticationRequired { message }
            | Self::NotFound { message }
            | Self::Validation { message }
            | Self::InvalidTimestamp { message }
            | Self::Conflict { message }
            | Self::Storage { message }
            | Self::Internal { message } => message,
        }
    }

    /// Whether the error originates in an adapter rather than in caller input
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Internal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Key 'key-1' not found");
        assert_eq!(error.to_string(), "Not found: Key 'key-1' not found");
        assert_eq!(error.kind(), "not_found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("reps must be greater than 0");
        assert_eq!(error.to_string(), "Validation error: reps must be greater than 0");
        assert_eq!(error.message(), "reps must be greater than 0");
    }

    #[test]
    fn test_invalid_timestamp_kind_is_distinct() {
        let error = DomainError::invalid_timestamp("not-a-date");
        assert_eq!(error.kind(), "invalid_timestamp");
        assert_ne!(error.kind(), DomainError::validation("x").kind());
    }

    #[test]
    fn test_internal_kinds() {
        assert!(DomainError::storage("db down").is_internal());
        assert!(DomainError::internal("lock poisoned").is_internal());
        assert_eq!(DomainError::storage("db down").kind(), "internal_error");
        assert!(!DomainError::conflict("dup").is_internal());
    }
}
