//! Data models
//!
//! Shared between the server and API clients. Document identifiers travel
//! as `_id` strings.

pub mod order;
pub mod service;
pub mod token;

// Re-exports
pub use order::*;
pub use service::*;
pub use token::*;
