use axum::{
    Json,
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::QueryRejection;
use serde_json::json;

use crate::upload::UploadError;

/// Error returned by every HTTP handler, rendered as `{"error", "message"}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] yummio_shared::Error),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("{0}")]
    BadRequest(String),

    #[error("too many requests, please try again later")]
    RateLimited,
}

impl AppError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        use yummio_shared::Error;

        match self {
            AppError::Domain(e) => {
                let status = match e {
                    Error::Validate(_) | Error::User(_) => StatusCode::BAD_REQUEST,
                    Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                    Error::Forbidden(_) => StatusCode::FORBIDDEN,
                    Error::NotFound(_) => StatusCode::NOT_FOUND,
                    Error::Conflict(_) => StatusCode::CONFLICT,
                    Error::Upstream(_) => StatusCode::BAD_GATEWAY,
                    Error::Server(_) | Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };

                (status, e.kind())
            }
            AppError::Upload(UploadError::InvalidType(_)) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_media_type")
            }
            AppError::Upload(UploadError::TooLarge { .. }) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large")
            }
            AppError::Upload(UploadError::Upstream(_)) => (StatusCode::BAD_GATEWAY, "upstream"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
            "internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        AppError::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        AppError::BadRequest(value.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(value: MultipartError) -> Self {
        AppError::BadRequest(value.body_text())
    }
}
