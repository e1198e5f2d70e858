//! Shared types for the garage booking backend
//!
//! Wire types used by the server and its clients: error codes, the
//! response envelope and the catalog/order models.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::Envelope;
