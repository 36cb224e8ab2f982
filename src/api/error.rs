//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::dto::ErrorResponse;
use crate::report::ReportError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// A report could not be produced; `message` is what the caller sees
    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        #[source]
        source: ReportError,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn upstream(message: &'static str, source: ReportError) -> Self {
        ApiError::Upstream { message, source }
    }

    /// Text of the `error` field in the response body
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Upstream { message, .. } => message.to_string(),
            ApiError::Internal(_) | ApiError::Io(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::new_v4().to_string();

        // Log the error
        tracing::error!(
            request_id = %request_id,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
