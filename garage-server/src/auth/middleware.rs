//! Access guard
//!
//! Protected routes run behind [`require_auth`]. It reads
//! `Authorization: Bearer <token>`, verifies the token and injects the
//! [`TokenClaims`] into the request extensions before the handler runs.
//!
//! | Failure | HTTP status |
//! |---------|-------------|
//! | no `Authorization` header | 401 |
//! | not a bearer header, bad/expired token | 403 |

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Uri},
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, AppResult};

use crate::auth::{TokenClaims, TokenError, TokenService};
use crate::security_log;
use crate::state::AppState;

/// Identity attached to the response of an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: Option<String>,
}

/// Verify the bearer token carried by `headers`
pub fn authenticate(headers: &HeaderMap, uri: &Uri, tokens: &TokenService) -> AppResult<TokenClaims> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    let token = match auth_header {
        Some(header) => TokenService::extract_from_header(header).ok_or_else(|| {
            security_log!("auth_malformed_header", uri = uri);
            AppError::invalid_token("Forbidden access")
        })?,
        None => {
            security_log!("auth_missing", uri = uri);
            return Err(AppError::unauthorized());
        }
    };

    tokens.verify(token).map_err(|e| {
        security_log!("auth_failed", error = e, uri = uri);
        match e {
            TokenError::Expired => AppError::token_expired(),
            _ => AppError::invalid_token("Forbidden access"),
        }
    })
}

/// Authentication middleware for protected routes
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(req.headers(), req.uri(), &state.tokens)?;
    let identity = Identity {
        email: claims.email().map(str::to_string),
    };
    req.extensions_mut().insert(claims);

    let mut response = next.run(req).await;
    response.extensions_mut().insert(identity);
    Ok(response)
}
