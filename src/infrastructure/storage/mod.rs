//! Storage infrastructure - PostgreSQL pool and schema migrations

pub mod migrations;
mod postgres;

pub use migrations::{run_schema_migrations, schema_migrations, Migration, PostgresMigrator};
pub use postgres::{connect_pool, is_unique_violation, PostgresConfig};
