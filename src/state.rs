//! Shared application state for all routes. The store is injected, never global.

use crate::repository::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Acting user when a request carries no identity header.
    pub default_user_id: i32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, default_user_id: i32) -> Self {
        AppState { store, default_user_id }
    }
}
