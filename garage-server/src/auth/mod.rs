//! Bearer-token authentication

mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{TOKEN_TTL_SECS, TokenClaims, TokenError, TokenService};
pub use middleware::{Identity, authenticate, require_auth};
