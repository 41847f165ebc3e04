//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::api_key::KeyStore;
use crate::infrastructure::owner::OwnerService;
use crate::infrastructure::services::{DispatchService, StatsService};

/// Every service a transport adapter needs, wired to one storage backend
#[derive(Debug, Clone)]
pub struct AppState {
    pub owner_service: Arc<OwnerService>,
    pub key_store: Arc<KeyStore>,
    pub dispatch_service: Arc<DispatchService>,
    pub stats_service: Arc<StatsService>,
}
