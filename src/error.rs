use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::vendor::VendorError;

pub const RATE_LIMIT_MESSAGE: &str = "request too frequent, wait one minute";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited { retry_after: Duration },

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::RateLimited { .. } => "RateLimitError",
            AppError::Upstream(_) => "UpstreamError",
            AppError::Internal(_) => "InternalError",
        }
    }

    // Prefix upstream and internal failures with what we were trying to do
    pub fn context(self, action: &str) -> Self {
        match self {
            AppError::Upstream(message) => AppError::Upstream(format!("{action}: {message}")),
            AppError::Internal(message) => AppError::Internal(format!("{action}: {message}")),
            other => other,
        }
    }
}

impl From<VendorError> for AppError {
    fn from(err: VendorError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

// {error} body used by the generation endpoints
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(json!({ "error": self.to_string() }))).into_response();

        if let AppError::RateLimited { retry_after } = self {
            // round up so clients never retry a second early
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

// {status: "error", error} body used by the status poller
pub struct StatusCheckError(pub AppError);

impl IntoResponse for StatusCheckError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "error": self.0.to_string() })),
        )
            .into_response()
    }
}

// {status: "error", message, type} body used by the connection test
pub struct ConnectionTestError(pub AppError);

impl IntoResponse for ConnectionTestError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "message": self.0.to_string(),
                "type": self.0.kind(),
            })),
        )
            .into_response()
    }
}
