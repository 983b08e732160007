//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storybook_session::session::SessionClosed;
use thiserror::Error;

/// Errors a request handler can produce.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The engine thread is gone; commands cannot be queued.
    #[error("session unavailable: {0}")]
    SessionUnavailable(#[from] SessionClosed),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            Self::SessionUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "session_unavailable")
            }
        };
        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_unavailable_maps_to_503() {
        let response = ApiError::SessionUnavailable(SessionClosed).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
