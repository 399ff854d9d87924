//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type every handler returns:
/// - Standardized error codes via [`ErrorCode`]
/// - Client-facing message
/// - Optional underlying failure text (`error` in the JSON body)
/// - Optional extra fields merged into the JSON body
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Client-facing error message
    pub message: String,
    /// Underlying failure description
    pub error: Option<String>,
    /// Additional fields for the response body
    pub details: Option<Map<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            error: None,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            error: None,
            details: None,
        }
    }

    /// Attach the underlying failure description
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a value out of range error
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValueOutOfRange, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a user not found error
    pub fn user_not_found(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::UserNotFound, msg)
    }

    /// Create a route not found error
    pub fn route_not_found() -> Self {
        Self::new(ErrorCode::RouteNotFound)
    }

    /// Create a conflict error for an already registered email
    pub fn email_conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::EmailAlreadyExists, msg)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create an administrator required error
    pub fn admin_required() -> Self {
        Self::new(ErrorCode::AdminRequired)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Unified API response structure
///
/// Every endpoint answers with this envelope:
/// - `success`: whether the operation succeeded
/// - `message`: human-readable message (mutations and errors)
/// - `count`: number of items (list endpoints)
/// - `data`: response payload
/// - `error`: underlying failure description (errors only)
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    /// Create a success response with custom message and data
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success(data)
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Create a list response carrying the item count
    pub fn list(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len()),
            ..Self::success(items)
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            success: false,
            message: Some(err.message.clone()),
            count: None,
            data: None,
            error: err.error.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                error = ?self.error,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}
