//! API response envelope
//!
//! Every data endpoint answers with the same shape:
//!
//! ```json
//! { "success": true, "message": "Successfully got the data", "data": [ ... ] }
//! { "success": false, "message": "Order not found" }
//! { "success": false, "error": "Malformed identifier: 42" }
//! ```
//!
//! `message` carries handled outcomes (found nothing, nothing deleted),
//! `error` carries failures raised while serving the request.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Uniform response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful response carrying data
    ///
    /// Use `T = Option<X>` when an absent record must be sent as `"data": null`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    /// Successful response with only a message
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// Handled negative outcome (`success: false` + `message`)
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// Failure raised while serving the request (`success: false` + `error`)
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_serializes_data() {
        let envelope = Envelope::ok("Successfully got the data", vec![1, 2]);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": true, "message": "Successfully got the data", "data": [1, 2]})
        );
    }

    #[test]
    fn test_ok_with_absent_record_keeps_null_data() {
        let envelope: Envelope<Option<u32>> = Envelope::ok("Successfully got the data", None);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": true, "message": "Successfully got the data", "data": null})
        );
    }

    #[test]
    fn test_failure_and_error_shapes() {
        assert_eq!(
            serde_json::to_value(Envelope::failure("Order not found")).unwrap(),
            json!({"success": false, "message": "Order not found"})
        );
        assert_eq!(
            serde_json::to_value(Envelope::error("boom")).unwrap(),
            json!({"success": false, "error": "boom"})
        );
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let envelope: Envelope<()> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(envelope.success);
        assert!(envelope.message.is_none());
        assert!(envelope.error.is_none());
    }
}
