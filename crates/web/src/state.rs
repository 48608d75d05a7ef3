use std::sync::Arc;

use p10_storage::repository::PickStore;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub picks: Arc<dyn PickStore>,
}

impl AppState {
    pub fn new(picks: Arc<dyn PickStore>) -> Self {
        Self { picks }
    }
}
