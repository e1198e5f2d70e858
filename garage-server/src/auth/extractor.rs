//! Claims extractor
//!
//! Handlers behind [`require_auth`](super::require_auth) take `TokenClaims`
//! as an argument. Without the middleware the header is verified here.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;

use crate::auth::{TokenClaims, authenticate};
use crate::state::AppState;

impl FromRequestParts<AppState> for TokenClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already verified by the middleware
        if let Some(claims) = parts.extensions.get::<TokenClaims>() {
            return Ok(claims.clone());
        }

        let claims = authenticate(&parts.headers, &parts.uri, &state.tokens)?;
        parts.extensions.insert(claims.clone());
        Ok(claims)
    }
}
