//! Owner validation utilities

use thiserror::Error;

/// Errors that can occur during owner validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OwnerValidationError {
    #[error("Owner ID cannot be empty")]
    EmptyId,

    #[error("Owner ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("Owner ID must start and end with a letter or number")]
    InvalidIdBoundary,

    #[error("Owner ID contains invalid character: '{0}'. Only alphanumeric characters and hyphens are allowed")]
    InvalidIdCharacter(char),

    #[error("Owner name cannot be empty")]
    EmptyName,

    #[error("Owner name exceeds maximum length of {0} characters")]
    NameTooLong(usize),
}

const MAX_OWNER_ID_LENGTH: usize = 64;
const MAX_OWNER_NAME_LENGTH: usize = 100;

/// Validate an owner ID
///
/// Rules:
/// - Cannot be empty
/// - Maximum 64 characters
/// - Only ASCII alphanumeric characters and hyphens
/// - Must start and end with alphanumeric
pub fn validate_owner_id(id: &str) -> Result<(), OwnerValidationError> {
    if id.is_empty() {
        return Err(OwnerValidationError::EmptyId);
    }

    if id.len() > MAX_OWNER_ID_LENGTH {
        return Err(OwnerValidationError::IdTooLong(MAX_OWNER_ID_LENGTH));
    }

    if let Some(c) = id.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
        return Err(OwnerValidationError::InvalidIdCharacter(c));
    }

    if id.starts_with('-') || id.ends_with('-') {
        return Err(OwnerValidationError::InvalidIdBoundary);
    }

    Ok(())
}

/// Validate an owner display name (already trimmed)
pub fn validate_owner_name(name: &str) -> Result<(), OwnerValidationError> {
    if name.is_empty() {
        return Err(OwnerValidationError::EmptyName);
    }

    if name.chars().count() > MAX_OWNER_NAME_LENGTH {
        return Err(OwnerValidationError::NameTooLong(MAX_OWNER_NAME_LENGTH));
    }

    Ok(())
}
