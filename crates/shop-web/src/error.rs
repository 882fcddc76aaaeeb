//! Mapping of domain errors to HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shop_core::ShopError;

/// Body returned for every storage failure. The cause only goes to the log.
pub const STORAGE_FAILURE_MESSAGE: &str = "Storage operation failed";

/// Error returned by handlers; renders as `{ "error": ... }`.
#[derive(Debug)]
pub enum ApiError {
    Shop(ShopError),
    /// Request body rejected by an extractor, with the extractor's status.
    Rejected(StatusCode, String),
}

impl From<ShopError> for ApiError {
    fn from(e: ShopError) -> Self {
        Self::Shop(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Shop(ShopError::validation(e.body_text()))
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(e: MultipartRejection) -> Self {
        Self::Rejected(e.status(), e.body_text())
    }
}

// Keeps 413 for bodies over the upload limit.
impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self::Rejected(e.status(), e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::Shop(err) => err,
            Self::Rejected(status, message) => {
                return (status, Json(json!({ "error": message }))).into_response();
            }
        };

        let (status, message) = match err {
            ShopError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ShopError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ShopError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ShopError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ShopError::Storage(cause) => {
                tracing::error!(error = %cause, "Storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, STORAGE_FAILURE_MESSAGE.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ShopError::validation("x"), StatusCode::BAD_REQUEST),
            (ShopError::Auth("x".into()), StatusCode::UNAUTHORIZED),
            (ShopError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ShopError::Conflict("x".into()), StatusCode::CONFLICT),
            (ShopError::storage("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_rejection_keeps_status() {
        let err = ApiError::Rejected(StatusCode::PAYLOAD_TOO_LARGE, "too large".into());
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
