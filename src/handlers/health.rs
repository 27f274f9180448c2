use axum::{Json, response::IntoResponse};
use tracing::debug;

use crate::metrics::REQUEST_TOTAL;

// GET /ping
pub async fn ping_handler() -> impl IntoResponse {
    REQUEST_TOTAL.with_label_values(&["ping"]).inc();
    debug!("ping");
    Json(serde_json::json!({
        "status": "success",
        "message": "pong",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
