pub mod api_client;
pub mod cache;
pub mod config;
pub mod handlers;
pub mod openapi;
pub mod pipeline;
pub mod reshaper;
pub mod stations;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/", get(handlers::get_aqhi))
        .route("/health", get(handlers::health))
        .merge(openapi::swagger_ui())
        // Every other path behaves like `/`
        .fallback(handlers::get_aqhi)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
