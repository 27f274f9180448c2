use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_VIDEO_PROMPT: &str = "make the picture move";

// POST /generate-image body
#[derive(Deserialize, Debug, Default)]
pub struct GenerateImageBody {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateImageBody {
    pub fn prompt(&self) -> Result<&str, AppError> {
        non_blank(self.prompt.as_deref())
            .ok_or_else(|| AppError::Validation("please provide a prompt".to_string()))
    }
}

// POST /generate-video body
#[derive(Deserialize, Debug, Default)]
pub struct GenerateVideoBody {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateVideoBody {
    pub fn image_url(&self) -> Result<&str, AppError> {
        non_blank(self.image_url.as_deref())
            .ok_or_else(|| AppError::Validation("please provide an image URL".to_string()))
    }

    // falls back to the stock animation prompt
    pub fn prompt(&self) -> &str {
        non_blank(self.prompt.as_deref()).unwrap_or(DEFAULT_VIDEO_PROMPT)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ImageUrlResponse {
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct VideoSubmittedResponse {
    pub status: String,
    pub task_id: String,
    pub request_id: Option<String>,
}

// GET /check-video-status/{task_id} success bodies
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VideoStatusResponse {
    Completed {
        video_url: String,
        cover_image_url: Option<String>,
    },
    Failed {
        error: String,
    },
    Processing {
        task_id: String,
        request_id: Option<String>,
        model: Option<String>,
    },
}

/// Parse a JSON request body regardless of its `Content-Type`.
///
/// Empty and malformed bodies both become validation errors so clients
/// always get the JSON error shape back.
pub fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("invalid JSON body: {e}")))
}

// Whitespace-only counts as missing, but the value itself is passed on as sent
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
