//! garage-server: booking backend for a vehicle-service garage
//!
//! Lists the service catalog, takes and manages customer orders, and issues
//! the bearer tokens that protect order access.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod middleware;
pub mod orders;
pub mod state;

// Re-exports
pub use config::Config;
pub use state::AppState;

/// Security event, logged under the `security` target
#[macro_export]
macro_rules! security_log {
    ($event:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::warn!(
            target: "security",
            event = $event,
            $($key = %$value),*
        );
    };
}
