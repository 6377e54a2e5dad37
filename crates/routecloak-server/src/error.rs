//! HTTP error types for the `RouteCloak` server.
//!
//! Maps domain errors from `routecloak-core` into JSON responses. Every error
//! variant produces a body with a machine-readable `error` field and a
//! human-readable `message`. Path resolution never goes through here: an
//! unresolvable path is a redirect, not an error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use routecloak_core::{CodecError, RouteError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Client sent invalid input.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        }

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CodecError> for AppError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::EmptySegment
            | CodecError::SegmentTooLong { .. }
            | CodecError::InvalidCharacter { .. } => Self::BadRequest(err.to_string()),

            CodecError::EmptySecret
            | CodecError::Encryption { .. }
            | CodecError::KeyDerivation { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::NotAModule { .. }
            | RouteError::NotASubModule { .. }
            | RouteError::InvalidRecordId { .. } => Self::BadRequest(err.to_string()),
            RouteError::MissingToken { .. } => Self::Internal(err.to_string()),
            RouteError::Codec(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_segment_is_bad_request() {
        let err: AppError = CodecError::EmptySegment.into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn wrapped_codec_error_keeps_mapping() {
        let err: AppError = RouteError::Codec(CodecError::Encryption {
            reason: "boom".to_owned(),
        })
        .into();
        assert!(matches!(err, AppError::Internal(msg) if msg.contains("boom")));
    }

    #[test]
    fn response_status_matches_variant() {
        let resp = AppError::BadRequest("nope".to_owned()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = AppError::Internal("nope".to_owned()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
