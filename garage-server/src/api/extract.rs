//! JSON body extractor answering rejections with the failure envelope

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use shared::error::AppError;

/// Like [`axum::Json`], but a bad body yields `{success:false, error}` (200)
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::invalid_format(rejection.body_text()))
            }
        }
    }
}
