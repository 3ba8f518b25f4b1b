//! Application state for the web layer.

use std::sync::Arc;

use crate::auth::TokenClient;
use crate::query::QueryEngine;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The query engine handling cheapest-fuel requests.
    pub engine: Arc<QueryEngine<TokenClient>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: QueryEngine<TokenClient>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
