//! Shared application state handed to every request handler.

use crate::config::AppConfig;
use crate::services::RoomManager;

#[derive(Clone)]
pub struct AppState {
    pub rooms: RoomManager,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            rooms: RoomManager::new(config.pacing.clone()),
            config,
        }
    }
}
