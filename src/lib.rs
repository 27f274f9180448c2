pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod vendor;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

// Build the router with every relay route
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home_handler))
        .route("/ping", get(handlers::ping_handler))
        .route("/test-connection", get(handlers::test_connection_handler))
        .route("/generate-image", post(handlers::generate_image_handler))
        .route("/generate-video", post(handlers::generate_video_handler))
        .route(
            "/check-video-status/{task_id}",
            get(handlers::check_video_status_handler),
        )
        .route("/metrics", get(handlers::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // any origin, like the original deployment
        .with_state(state)
}
