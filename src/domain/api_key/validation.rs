//! API key validation

use thiserror::Error;

/// Marker every key id starts with
pub(crate) const KEY_ID_MARKER: &str = "key-";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("API key ID cannot be empty")]
    EmptyId,

    #[error("API key ID exceeds maximum length of {0} characters")]
    TooLong(usize),

    #[error("API key ID must start with 'key-' followed by at least one character")]
    MissingMarker,

    #[error("API key ID contains invalid character: '{0}'")]
    InvalidCharacter(char),

    #[error("API key ID cannot end with a hyphen")]
    TrailingHyphen,

    #[error("API key name cannot be empty")]
    EmptyName,

    #[error("API key name exceeds maximum length of {0} characters")]
    NameTooLong(usize),
}

const MAX_API_KEY_ID_LENGTH: usize = 64;
const MAX_API_KEY_NAME_LENGTH: usize = 100;

/// Validate an API key ID: `key-` followed by ASCII letters, digits and
/// hyphens, at most 64 characters overall.
pub fn validate_api_key_id(id: &str) -> Result<(), ApiKeyValidationError> {
    if id.is_empty() {
        return Err(ApiKeyValidationError::EmptyId);
    }

    if id.len() > MAX_API_KEY_ID_LENGTH {
        return Err(ApiKeyValidationError::TooLong(MAX_API_KEY_ID_LENGTH));
    }

    let body = match id.strip_prefix(KEY_ID_MARKER) {
        Some(body) if !body.is_empty() => body,
        _ => return Err(ApiKeyValidationError::MissingMarker),
    };

    if let Some(c) = body.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
        return Err(ApiKeyValidationError::InvalidCharacter(c));
    }

    if body.ends_with('-') {
        return Err(ApiKeyValidationError::TrailingHyphen);
    }

    Ok(())
}

/// Validate a display name for a key (already trimmed)
pub fn validate_api_key_name(name: &str) -> Result<(), ApiKeyValidationError> {
    if name.is_empty() {
        return Err(ApiKeyValidationError::EmptyName);
    }

    if name.chars().count() > MAX_API_KEY_NAME_LENGTH {
        return Err(ApiKeyValidationError::NameTooLong(MAX_API_KEY_NAME_LENGTH));
    }

    Ok(())
}
