//! API key infrastructure
//!
//! Secret generation and hashing, in-memory and PostgreSQL repositories,
//! and the key store service.

mod generator;
mod postgres_repository;
mod repository;
mod service;

pub use generator::{hash_secret, GeneratedSecret, KeyGenerator};
pub use postgres_repository::PostgresApiKeyRepository;
pub use repository::InMemoryApiKeyRepository;
pub use service::{CreatedKey, KeyStore, ResolvedCaller};
