pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::search::SearchService;
use crate::state::ProductStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
}

impl AppState {
    pub fn new(search: Arc<SearchService>) -> Self {
        Self { search }
    }

    /// Store behind the search service
    pub fn store(&self) -> &Arc<dyn ProductStore> {
        self.search.store()
    }
}
