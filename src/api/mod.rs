pub mod handlers;

use crate::core::search::SearchService;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub const PING_PATH: &str = "/ping";
pub const SEARCH_PATH: &str = "/api/v1/search";

/// Shared state handed to every request handler.
pub struct AppState {
    pub search: SearchService,
}

impl AppState {
    pub fn new(search: SearchService) -> Self {
        Self { search }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(PING_PATH, get(handlers::ping))
        .route(SEARCH_PATH, post(handlers::search))
        .layer(middleware::from_fn(handlers::catch_panic))
        .with_state(state)
}
