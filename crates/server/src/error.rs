// =============================================================================
// pngico Server - Error Types
// =============================================================================

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::convert::ConvertError;
use crate::resize::ResizeError;
use crate::sizes::SizesError;

/// API error type for the conversion endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No file provided")]
    MissingFile,

    #[error("Invalid sizes: {0}")]
    InvalidSizes(#[from] SizesError),

    #[error("Invalid image: {0}")]
    InvalidImage(#[source] ResizeError),

    #[error("Invalid upload: {0}")]
    InvalidUpload(#[from] MultipartError),

    #[error("Conversion failed: {0}")]
    Conversion(#[source] ConvertError),
}

impl From<ConvertError> for ApiError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::InvalidImage(e) => ApiError::InvalidImage(e),
            other => ApiError::Conversion(other),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingFile => (StatusCode::BAD_REQUEST, "No file provided".to_string()),
            ApiError::InvalidSizes(e) => (StatusCode::BAD_REQUEST, format!("Invalid sizes: {}", e)),
            ApiError::InvalidImage(e) => {
                tracing::warn!("Rejected upload: {}", e);
                (StatusCode::BAD_REQUEST, "Invalid image".into())
            }
            ApiError::InvalidUpload(e) => {
                tracing::warn!("Malformed multipart body: {}", e);
                (e.status(), "Invalid upload".into())
            }
            ApiError::Conversion(e) => {
                tracing::error!("Conversion error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to convert image".into())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
