//! Order Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Key the store owns; never taken from a caller payload
const RESERVED_KEY: &str = "_id";

/// Order entity as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    /// Owner email, the key for list access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Service reference (String ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Free-form status, e.g. "pending" / "approved"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Remaining caller-supplied fields (customer, phone, price, ...)
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Create order payload
///
/// `email` and `service` are required; every other field is kept as sent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrder {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub status: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl NewOrder {
    /// Flatten into the document body to persist, minus store-owned keys
    pub fn into_document(self) -> Map<String, Value> {
        let mut doc = self.details;
        doc.remove(RESERVED_KEY);
        doc.insert("email".to_string(), Value::String(self.email));
        doc.insert("service".to_string(), Value::String(self.service));
        if let Some(status) = self.status {
            doc.insert("status".to_string(), Value::String(status));
        }
        doc
    }
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusUpdate {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Result of inserting a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Result of updating a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}
