use async_trait::async_trait;
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::WebError;
use crate::core::RecordId;

/// Numeric `:id` path segment. A non-numeric id is a 400 in the usual error shape.
pub struct IdParam(pub RecordId);

#[async_trait]
impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<RecordId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| WebError::Input(rejection.body_text()))?;
        Ok(Self(id))
    }
}

/// JSON body whose rejections use the usual error shape.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| WebError::Input(rejection.body_text()))?;
        Ok(Self(value))
    }
}
