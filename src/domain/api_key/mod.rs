//! API Key domain
//!
//! This module provides domain types and traits for API key management:
//! the key entity, its active/revoked lifecycle, and the lookup contract
//! used during authentication.

mod entity;
mod repository;
mod validation;

pub use entity::{ApiKey, ApiKeyId};
pub use repository::ApiKeyRepository;
pub use validation::{validate_api_key_id, validate_api_key_name, ApiKeyValidationError};
