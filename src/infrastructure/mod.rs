//! Infrastructure layer - storage adapters, services and ambient plumbing

pub mod api_key;
pub mod audit;
pub mod logging;
pub mod observability;
pub mod owner;
pub mod services;
pub mod storage;
pub mod workout;
