//! Owner domain
//!
//! The authenticated principal that keys, set records, plans and audit
//! entries belong to.

mod entity;
mod repository;
mod validation;

pub use entity::{Owner, OwnerId};
pub use repository::OwnerRepository;
pub use validation::{validate_owner_id, validate_owner_name, OwnerValidationError};
