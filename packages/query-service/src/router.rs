//! HTTP router setup.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub fn create(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/blocks", post(handlers::ingest_block))
        .route("/entities/{collection}", get(handlers::list_entities))
        .route("/entities/{collection}/{id}", get(handlers::get_entity))
        .route("/daos", get(handlers::daos))
        .route("/daos/{dao_id}/{collection}", get(handlers::dao_collection))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
