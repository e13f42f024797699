use std::sync::Arc;

use beacon_events::{NotificationStore, Publisher};
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The process-wide notification store.
    pub store: Arc<NotificationStore>,
    /// Cancelled on shutdown; ends every open notification stream.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Build state around a freshly seeded store.
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(NotificationStore::from_config(&config.bus));
        Self {
            config: Arc::new(config),
            store,
            shutdown: CancellationToken::new(),
        }
    }

    /// The publish capability handed to producers.
    pub fn publisher(&self) -> &dyn Publisher {
        self.store.as_ref()
    }
}
