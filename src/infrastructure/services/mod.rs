//! Infrastructure services

mod command_service;
mod dispatch_service;
mod stats_service;

pub use command_service::CommandService;
pub use dispatch_service::DispatchService;
pub use stats_service::{StatsService, DEFAULT_TRACKED_LIFTS, DEFAULT_WINDOW_DAYS};
