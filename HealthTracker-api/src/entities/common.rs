use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};
use utoipa::{IntoParams, ToSchema};

use health_tracker_domain::services::{HealthDataServiceError, ValidationError};

/// Error response format for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(resource: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: format!("The requested {} could not be found", resource),
            details: None,
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details,
        }
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create a response for a failed record store call
    pub fn backend_error(message: &str) -> Self {
        Self {
            error: "backend_error".to_string(),
            message: "The record store could not complete the request".to_string(),
            details: Some(json!({ "reason": message })),
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }

    /// HTTP status matching the error code
    pub fn status_code(&self) -> StatusCode {
        match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" | "bad_request" => StatusCode::BAD_REQUEST,
            "backend_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        warn!("Rejected measurement: {}", err);
        ErrorResponse::validation_error(&err.to_string(), Some(json!({ "field": err.field() })))
    }
}

impl From<HealthDataServiceError> for ErrorResponse {
    fn from(err: HealthDataServiceError) -> Self {
        match err {
            HealthDataServiceError::Validation(e) => e.into(),
            HealthDataServiceError::Backend(e) => ErrorResponse::backend_error(&e.to_string()),
            HealthDataServiceError::Lock(e) => {
                error!("Measurement list lock poisoned: {}", e);
                ErrorResponse::internal_error()
            }
        }
    }
}

impl From<QueryRejection> for ErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        warn!("Rejected query string: {}", rejection.body_text());
        ErrorResponse::bad_request(&rejection.body_text())
    }
}

/// Optional week filter
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct WeekQuery {
    /// Week number to restrict the result to
    pub week: Option<u8>,
}
