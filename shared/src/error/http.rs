//! HTTP status mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::UserNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::EmailAlreadyExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::AdminRequired => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::ValidationFailed | Self::InvalidRequest | Self::ValueOutOfRange => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}
