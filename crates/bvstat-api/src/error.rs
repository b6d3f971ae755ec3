//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use bvstat_cloud::CloudError;
use bvstat_scraper::ScrapeError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Message for a request without a usable `video_url` field.
pub const NO_VIDEO_URL: &str = "No video URL provided";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error(transparent)]
    Cloud(#[from] CloudError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Scrape(e) if e.is_network() || e.is_decode() => StatusCode::BAD_GATEWAY,
            ApiError::Cloud(e) if e.is_empty_input() => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) | ApiError::Scrape(_) | ApiError::Cloud(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        error_response(status, self.to_string())
    }
}

/// JSON error body `{"error": message}` with `status`.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}
