//! Client for the generative-AI vendor API.
//!
//! Handlers only see the [`GenerationApi`] trait; [`ZhipuClient`] is the
//! reqwest-backed implementation used in production.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum VendorError {
    #[error("API key not set")]
    MissingApiKey,

    #[error("request to vendor failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("vendor returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("vendor response missing {0}")]
    MissingField(&'static str),

    #[error("unrecognized task status: {0}")]
    UnknownStatus(String),

    #[error("invalid vendor base url: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid task id: {0:?}")]
    InvalidTaskId(String),
}

// Image generation request body
#[derive(Debug, Clone, Serialize)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub size: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: Option<String>,
}

impl ImageResponse {
    pub fn first_url(&self) -> Result<&str, VendorError> {
        self.data
            .first()
            .and_then(|d| d.url.as_deref())
            .filter(|url| !url.is_empty())
            .ok_or(VendorError::MissingField("image url"))
    }
}

// Video generation request body
#[derive(Debug, Clone, Serialize)]
pub struct VideoRequest {
    pub model: String,
    pub prompt: String,
    pub image_url: String,
    pub quality: String,
    pub with_audio: bool,
    pub size: String,
    pub duration: u32,
    pub fps: u32,
}

// Submitted video task, also the shape of a status lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoTask {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub task_status: Option<String>,
    #[serde(default)]
    pub video_result: Vec<VideoResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Processing,
    Success,
    Fail,
}

impl TaskStatus {
    pub fn parse(raw: &str) -> Result<Self, VendorError> {
        match raw {
            "PROCESSING" => Ok(TaskStatus::Processing),
            "SUCCESS" => Ok(TaskStatus::Success),
            "FAIL" => Ok(TaskStatus::Fail),
            other => Err(VendorError::UnknownStatus(other.to_string())),
        }
    }
}

impl VideoTask {
    pub fn task_id(&self) -> Result<&str, VendorError> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(VendorError::MissingField("task id"))
    }

    pub fn status(&self) -> Result<TaskStatus, VendorError> {
        let raw = self
            .task_status
            .as_deref()
            .ok_or(VendorError::MissingField("task_status"))?;
        TaskStatus::parse(raw)
    }
}

#[async_trait]
pub trait GenerationApi: Send + Sync {
    async fn generate_image(&self, request: &ImageRequest) -> Result<ImageResponse, VendorError>;

    async fn generate_video(&self, request: &VideoRequest) -> Result<VideoTask, VendorError>;

    async fn retrieve_video_result(&self, task_id: &str) -> Result<VideoTask, VendorError>;
}

pub struct ZhipuClient {
    client: reqwest::Client,
    api_base: Url,
    api_key: Option<String>,
}

impl ZhipuClient {
    pub fn new(api_base: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, VendorError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let api_base =
            Url::parse(api_base).map_err(|e| VendorError::InvalidBaseUrl(format!("{api_base}: {e}")))?;
        if api_base.cannot_be_a_base() {
            return Err(VendorError::InvalidBaseUrl(api_base.to_string()));
        }
        Ok(Self {
            client,
            api_base,
            api_key,
        })
    }

    /// Append `segments` to the base path, percent-encoding each one so a
    /// segment can never add path levels or a query string.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, VendorError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| VendorError::InvalidBaseUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn api_key(&self) -> Result<&str, VendorError> {
        self.api_key.as_deref().ok_or(VendorError::MissingApiKey)
    }

    // Turn non-2xx responses into errors carrying the vendor's body text
    async fn decode<T: serde::de::DeserializeOwned>(res: reqwest::Response) -> Result<T, VendorError> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(VendorError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(res.json::<T>().await?)
    }
}

#[async_trait]
impl GenerationApi for ZhipuClient {
    async fn generate_image(&self, request: &ImageRequest) -> Result<ImageResponse, VendorError> {
        let key = self.api_key()?;
        debug!(model = %request.model, size = %request.size, "calling vendor image generation");

        let res = self
            .client
            .post(self.endpoint(&["images", "generations"])?)
            .bearer_auth(key)
            .json(request)
            .send()
            .await?;
        Self::decode(res).await
    }

    async fn generate_video(&self, request: &VideoRequest) -> Result<VideoTask, VendorError> {
        let key = self.api_key()?;
        debug!(model = %request.model, image_url = %request.image_url, "calling vendor video generation");

        let res = self
            .client
            .post(self.endpoint(&["videos", "generations"])?)
            .bearer_auth(key)
            .json(request)
            .send()
            .await?;
        Self::decode(res).await
    }

    async fn retrieve_video_result(&self, task_id: &str) -> Result<VideoTask, VendorError> {
        let key = self.api_key()?;
        if matches!(task_id.trim(), "" | "." | "..") {
            return Err(VendorError::InvalidTaskId(task_id.to_string()));
        }
        debug!(task_id, "fetching vendor task result");

        let res = self
            .client
            .get(self.endpoint(&["async-result", task_id])?)
            .bearer_auth(key)
            .send()
            .await?;
        Self::decode(res).await
    }
}
