use axum::{Json, body::Bytes, extract::State};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::timed;
use crate::error::AppError;
use crate::metrics::REQUEST_TOTAL;
use crate::models::{GenerateImageBody, ImageUrlResponse, parse_body};
use crate::state::AppState;
use crate::vendor::ImageRequest;

// POST /generate-image
pub async fn generate_image_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ImageUrlResponse>, AppError> {
    REQUEST_TOTAL.with_label_values(&["generate-image"]).inc();
    info!("image generation request received");

    let payload: GenerateImageBody = parse_body(&body).inspect_err(|e| {
        warn!(error = %e, "rejected image request body");
    })?;
    let prompt = payload.prompt().inspect_err(|_| {
        warn!("image request without prompt");
    })?;

    let request = ImageRequest {
        model: state.settings.image_model.clone(),
        prompt: prompt.to_string(),
        size: state.settings.image_size.clone(),
    };
    info!(prompt, size = %request.size, "generating image");

    let generated = timed("generate-image", async {
        let response = state.api.generate_image(&request).await?;
        response.first_url().map(str::to_string)
    })
    .await;

    match generated {
        Ok(url) => {
            info!(url = %url, "image generated");
            Ok(Json(ImageUrlResponse { url }))
        }
        Err(e) => {
            error!(error = %e, prompt, "image generation failed");
            Err(AppError::from(e).context("image generation failed"))
        }
    }
}
