//! Owner registry infrastructure

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresOwnerRepository;
pub use repository::InMemoryOwnerRepository;
pub use service::OwnerService;
