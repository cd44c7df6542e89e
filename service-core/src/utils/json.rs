use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `Json<T>` whose rejections render as [`AppError::InvalidBody`], keeping the
/// status axum picked (400 syntax, 415 content type, 422 shape).
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(
                    status = %rejection.status(),
                    error = %rejection.body_text(),
                    "Rejected request body"
                );
                AppError::InvalidBody(rejection.status(), rejection.body_text())
            })?;

        Ok(JsonBody(value))
    }
}
