//! API error handling for Image Manager.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::image::NameError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Payload too large (413).
    PayloadTooLarge,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
///
/// Always `{"error": "..."}`; lookup misses add `"filename": null`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Present only on lookup misses, where it is always `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<Value>,
}

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `name` query parameter is absent or blank.
    #[error("Missing ?name=")]
    MissingParameter,

    /// The `name` would resolve outside the image directory.
    #[error("Invalid name '{0}'")]
    InvalidName(String),

    /// The upload carried no `file` field.
    #[error("Missing file field named \"file\"")]
    MissingFile,

    /// No image is stored under the normalized name.
    #[error("Image for '{0}' not found")]
    NotFound(String),

    /// The multipart body could not be read.
    #[error("Invalid multipart data")]
    InvalidMultipart,

    /// The upload exceeded the configured body limit.
    #[error("File too large (max {0}MB)")]
    PayloadTooLarge(u64),

    /// The staged upload could not be moved into the store.
    #[error("Failed to save file")]
    StorageFailure,
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::MissingParameter
            | ApiError::InvalidName(_)
            | ApiError::MissingFile
            | ApiError::InvalidMultipart => ErrorCode::BadRequest,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::PayloadTooLarge(_) => ErrorCode::PayloadTooLarge,
            ApiError::StorageFailure => ErrorCode::InternalError,
        }
    }

    /// Build the JSON body for this error.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            filename: matches!(self, ApiError::NotFound(_)).then_some(Value::Null),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code().status_code(), Json(self.body())).into_response()
    }
}

impl From<NameError> for ApiError {
    fn from(err: NameError) -> Self {
        match err {
            NameError::Missing => ApiError::MissingParameter,
            NameError::NotPlain(name) => ApiError::InvalidName(name),
        }
    }
}
