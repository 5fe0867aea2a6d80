//! Shared application state for all routes. Immutable after startup.

use crate::store::UserStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: impl UserStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
