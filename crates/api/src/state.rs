use std::sync::Arc;

use patient_register_db::PatientStore;

use crate::flash::FlashQueue;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Record store gateway.
    pub store: Arc<dyn PatientStore>,
    /// Pending one-shot messages, per browser session.
    pub flashes: Arc<FlashQueue>,
}

impl AppState {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self {
            store,
            flashes: Arc::new(FlashQueue::new()),
        }
    }
}
