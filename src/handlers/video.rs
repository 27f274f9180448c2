use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::timed;
use crate::error::{AppError, StatusCheckError};
use crate::metrics::{RATE_LIMITED, REQUEST_TOTAL};
use crate::models::{GenerateVideoBody, VideoStatusResponse, VideoSubmittedResponse, parse_body};
use crate::state::AppState;
use crate::vendor::{TaskStatus, VendorError, VideoRequest, VideoTask};

/// POST /generate-video
///
/// The body is validated before the limiter is consulted, so a malformed
/// request never uses up the window. Admission happens before the vendor
/// call and the limiter lock is released by then.
pub async fn generate_video_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<VideoSubmittedResponse>, AppError> {
    REQUEST_TOTAL.with_label_values(&["generate-video"]).inc();
    info!("video generation request received");

    let payload: GenerateVideoBody = parse_body(&body).inspect_err(|e| {
        warn!(error = %e, "rejected video request body");
    })?;
    let image_url = payload.image_url().inspect_err(|_| {
        warn!("video request without image_url");
    })?;

    if let Err(retry_after) = state.video_limiter.admit() {
        RATE_LIMITED.inc();
        warn!(retry_after_secs = retry_after.as_secs(), "video generation rate limited");
        return Err(AppError::RateLimited { retry_after });
    }

    let settings = &state.settings;
    let request = VideoRequest {
        model: settings.video_model.clone(),
        prompt: payload.prompt().to_string(),
        image_url: image_url.to_string(),
        quality: settings.video_quality.clone(),
        with_audio: settings.video_with_audio,
        size: settings.video_size.clone(),
        duration: settings.video_duration,
        fps: settings.video_fps,
    };
    info!(image_url, prompt = %request.prompt, "submitting video generation task");

    let submitted = timed("generate-video", async {
        let task = state.api.generate_video(&request).await?;
        let task_id = task.task_id()?.to_string();
        Ok::<_, VendorError>((task_id, task.request_id))
    })
    .await;

    match submitted {
        Ok((task_id, request_id)) => {
            info!(task_id = %task_id, ?request_id, "video generation task submitted");
            Ok(Json(VideoSubmittedResponse {
                status: "processing".to_string(),
                task_id,
                request_id,
            }))
        }
        Err(e) => {
            error!(error = %e, image_url, "video generation failed");
            Err(AppError::from(e).context("video generation failed"))
        }
    }
}

/// GET /check-video-status/{task_id}
pub async fn check_video_status_handler(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<Json<VideoStatusResponse>, StatusCheckError> {
    REQUEST_TOTAL.with_label_values(&["check-video-status"]).inc();
    info!(task_id = %task_id, "checking video task status");

    let result = timed("check-video-status", async {
        let task = state.api.retrieve_video_result(&task_id).await?;
        to_status_response(&task_id, task)
    })
    .await;

    match result {
        Ok(response) => {
            info!(task_id = %task_id, ?response, "video task status fetched");
            Ok(Json(response))
        }
        Err(e) => {
            error!(error = %e, task_id = %task_id, "checking video status failed");
            Err(StatusCheckError(
                AppError::from(e).context("checking video status failed"),
            ))
        }
    }
}

// Map a vendor task onto the relay's status body
fn to_status_response(task_id: &str, task: VideoTask) -> Result<VideoStatusResponse, VendorError> {
    match task.status()? {
        TaskStatus::Success => {
            let result = task
                .video_result
                .into_iter()
                .next()
                .ok_or(VendorError::MissingField("video result"))?;
            let video_url = result
                .url
                .filter(|url| !url.is_empty())
                .ok_or(VendorError::MissingField("video url"))?;
            Ok(VideoStatusResponse::Completed {
                video_url,
                cover_image_url: result.cover_image_url,
            })
        }
        TaskStatus::Fail => Ok(VideoStatusResponse::Failed {
            error: "video generation failed".to_string(),
        }),
        TaskStatus::Processing => Ok(VideoStatusResponse::Processing {
            task_id: task
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| task_id.to_string()),
            request_id: task.request_id,
            model: task.model,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vendor::VideoResult;

    fn task(status: Option<&str>) -> VideoTask {
        VideoTask {
            task_status: status.map(str::to_string),
            ..VideoTask::default()
        }
    }

    #[test]
    fn success_maps_to_completed() {
        let mut t = task(Some("SUCCESS"));
        t.video_result = vec![VideoResult {
            url: Some("https://cdn/v.mp4".into()),
            cover_image_url: Some("https://cdn/c.png".into()),
        }];

        assert_eq!(
            to_status_response("t-1", t).unwrap(),
            VideoStatusResponse::Completed {
                video_url: "https://cdn/v.mp4".into(),
                cover_image_url: Some("https://cdn/c.png".into()),
            }
        );
    }

    #[test]
    fn success_without_result_is_an_error() {
        let err = to_status_response("t-1", task(Some("SUCCESS"))).unwrap_err();
        assert!(matches!(err, VendorError::MissingField("video result")));
    }

    #[test]
    fn fail_maps_to_failed() {
        assert!(matches!(
            to_status_response("t-1", task(Some("FAIL"))).unwrap(),
            VideoStatusResponse::Failed { .. }
        ));
    }

    #[test]
    fn processing_falls_back_to_path_task_id() {
        let mut t = task(Some("PROCESSING"));
        t.model = Some("cogvideox-flash".into());

        assert_eq!(
            to_status_response("t-1", t).unwrap(),
            VideoStatusResponse::Processing {
                task_id: "t-1".into(),
                request_id: None,
                model: Some("cogvideox-flash".into()),
            }
        );
    }

    #[test]
    fn missing_or_unknown_status_is_an_error() {
        assert!(to_status_response("t-1", task(None)).is_err());
        assert!(matches!(
            to_status_response("t-1", task(Some("PAUSED"))),
            Err(VendorError::UnknownStatus(_))
        ));
    }
}
