//! Translation of domain errors into structured HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use splitpot_core::SettlementError;
use splitpot_core::settlement::ErrorKind;
use splitpot_shared::AppError;

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    /// Application-level classification.
    pub error: AppError,
    /// Domain-specific reason code, when one exists.
    pub reason: Option<&'static str>,
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Application error code.
    pub error: &'static str,
    /// Domain-specific reason code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    /// Human-readable description.
    pub message: String,
}

impl ApiError {
    /// Wraps an application error with a reason code.
    #[must_use]
    pub const fn with_reason(error: AppError, reason: &'static str) -> Self {
        Self {
            error,
            reason: Some(reason),
        }
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns the response body for this error.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.error.error_code(),
            reason: self.reason,
            message: self.error.to_string(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            reason: None,
        }
    }
}

impl From<SettlementError> for ApiError {
    fn from(err: SettlementError) -> Self {
        let reason = err.error_code();
        let error = match err.kind() {
            ErrorKind::InvalidInput => AppError::Validation(err.to_string()),
            ErrorKind::InternalInvariantViolation => AppError::Internal(err.to_string()),
        };
        Self::with_reason(error, reason)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedRequest(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
