//! Shared application state.

use crate::config::Config;
use crate::store::ProductStore;

/// Everything a handler needs beyond the request itself.
///
/// Built once in `main`, wrapped in an `Arc` by the server, and reachable
/// from every handler through [`Request::state`](crate::Request::state).
/// Handlers never touch globals, so tests build their own isolated state.
pub struct AppState {
    pub config: Config,
    pub store: ProductStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config, store: ProductStore::seeded() }
    }
}
