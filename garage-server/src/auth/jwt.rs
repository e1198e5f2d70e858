//! Bearer token service
//!
//! Tokens carry a caller-chosen JSON object plus `iat`/`exp`, signed HS256.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Token lifetime
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Claims carried by a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Everything the caller asked to sign
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl TokenClaims {
    /// `email` claim, the identity orders are scoped to
    pub fn email(&self) -> Option<&str> {
        self.payload.get("email").and_then(Value::as_str)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::seconds(TOKEN_TTL_SECS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Sign `payload`; any caller-supplied `exp`/`iat` is replaced
    pub fn issue(&self, mut payload: Map<String, Value>) -> Result<String, TokenError> {
        payload.remove("exp");
        payload.remove("iat");

        let now = Utc::now();
        let claims = TokenClaims {
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
            payload,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Check signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }

    /// Token part of an `Authorization` header value; the scheme is
    /// matched case-insensitively
    pub fn extract_from_header(header: &str) -> Option<&str> {
        let (scheme, token) = header.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("Bearer") {
            return None;
        }
        Some(token.trim()).filter(|token| !token.is_empty())
    }
}
