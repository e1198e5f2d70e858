//! Service (catalog entry) model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bookable vehicle service
///
/// Catalog documents are written out-of-band and read verbatim: apart from
/// `_id`, every field (`title`, `price`, `img`, `facility`, ...) is kept in
/// `fields` and serialized back unchanged, whatever its JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Service {
    /// Title, when stored as a string
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    /// Price as a float, when stored as a number
    pub fn price_value(&self) -> Option<f64> {
        self.fields.get("price").and_then(Value::as_f64)
    }
}

/// Price ordering requested by `?order=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `"asc"` sorts ascending; any other value (or none) sorts descending
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}
