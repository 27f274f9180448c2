use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};

use super::timed;
use crate::error::{AppError, ConnectionTestError};
use crate::metrics::REQUEST_TOTAL;
use crate::state::AppState;
use crate::vendor::ImageRequest;

/// GET /test-connection
///
/// Issues one real image generation so a bad key or an unreachable vendor
/// shows up here rather than on the first user request.
pub async fn test_connection_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ConnectionTestError> {
    REQUEST_TOTAL.with_label_values(&["test-connection"]).inc();
    info!("testing vendor API connection");

    let request = ImageRequest {
        model: state.settings.image_model.clone(),
        prompt: "test image".to_string(),
        size: state.settings.image_size.clone(),
    };

    match timed("test-connection", state.api.generate_image(&request)).await {
        Ok(response) => {
            info!(?response, "vendor API connection OK");
            Ok(Json(json!({
                "status": "success",
                "message": "API connection OK, generation service available",
                "details": serde_json::to_value(&response).unwrap_or_default(),
            })))
        }
        Err(e) => {
            error!(error = %e, "vendor API connection test failed");
            Err(ConnectionTestError(
                AppError::from(e).context("API connection test failed"),
            ))
        }
    }
}
