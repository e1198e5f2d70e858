//! Token issuance model

use serde::{Deserialize, Serialize};

/// Body of `POST /jwt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
