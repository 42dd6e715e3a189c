//! Response envelope and error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gf_core::CoreError;
use serde::{Deserialize, Serialize};

/// Standard API response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope around `data`.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed envelope with a stable machine code.
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Error payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code (e.g. `PLAN_LIMIT_REACHED`).
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// `CoreError` adapter onto HTTP status codes and the error envelope.
///
/// Business outcomes keep their messages; only a backing-store failure is
/// treated as unexpected — logged and answered as an opaque 500.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            CoreError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.0.to_string()),
            CoreError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                self.0.to_string(),
            ),
            CoreError::Unauthorized => (StatusCode::FORBIDDEN, "FORBIDDEN", self.0.to_string()),
            CoreError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT", self.0.to_string()),
            CoreError::Policy { code, message } => {
                (StatusCode::BAD_REQUEST, *code, message.clone())
            }
            CoreError::Store(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            CoreError::Store(err) if err.is_conflict() => {
                (StatusCode::CONFLICT, "CONFLICT", err.to_string())
            }
            CoreError::Store(err) => {
                tracing::error!(%err, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_IO",
                    "internal storage error".to_string(),
                )
            }
        };
        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}
