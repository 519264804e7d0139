//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::TransportStore;
use crate::services::TrackingHub;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransportStore>,
    pub tracking_hub: TrackingHub,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn TransportStore>, config: EnvironmentConfig) -> Self {
        let tracking_hub = TrackingHub::new(config.subscriber_buffer, config.broadcast_send_timeout);
        Self {
            store,
            tracking_hub,
            config,
        }
    }
}
