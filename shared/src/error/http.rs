//! HTTP status code mapping for error codes
//!
//! Only authentication and authorization failures change the status line.
//! Every other failure is reported inside a 200 envelope with
//! `success: false`.

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 401 Unauthorized: no credentials at all
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // 403 Forbidden: credentials present but unusable, or wrong owner
            Self::TokenExpired | Self::TokenInvalid | Self::PermissionDenied => {
                StatusCode::FORBIDDEN
            }

            // Business and system failures travel in the envelope
            _ => StatusCode::OK,
        }
    }
}
