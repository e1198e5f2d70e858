//! Token issuance handler

use axum::Json;
use axum::extract::State;
use serde_json::Value;
use shared::error::{AppError, AppResult};
use shared::models::TokenResponse;

use crate::api::ApiJson;
use crate::state::AppState;

/// POST /jwt
///
/// Signs whatever JSON object is posted. No credential check happens here.
pub async fn issue(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Value>,
) -> AppResult<Json<TokenResponse>> {
    let Value::Object(payload) = payload else {
        return Err(AppError::invalid_request(
            "Token payload must be a JSON object",
        ));
    };

    let token = state.tokens.issue(payload).map_err(|e| {
        tracing::error!(error = %e, "Token signing failed");
        AppError::internal("Couldn't issue token")
    })?;

    Ok(Json(TokenResponse { token }))
}
