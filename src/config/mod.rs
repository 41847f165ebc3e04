//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuditConfig, KeysConfig, LogFormat, LoggingConfig, StatsConfig, StorageBackend,
    StorageConfig,
};
