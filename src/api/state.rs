use std::sync::Arc;

use crate::catalog::CatalogStore;

/// Shared application state
///
/// The catalog snapshot is immutable after load, so handlers share it behind
/// an `Arc` with no locking. Replacing the catalog would mean installing a
/// whole new state, never mutating this one.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    /// Number of recommendations returned per request
    pub top_k: usize,
}

impl AppState {
    /// Creates application state around a loaded catalog snapshot
    pub fn new(catalog: CatalogStore, top_k: usize) -> Self {
        Self {
            catalog: Arc::new(catalog),
            top_k,
        }
    }
}
