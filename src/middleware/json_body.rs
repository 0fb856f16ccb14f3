use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::HopeError;

/// `Json<T>` whose rejection is a JSON 400 `HopeError` rather than axum's
/// plain-text response.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = HopeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => Ok(JsonBody(body)),
            Err(rejection) => {
                let reason = rejection.body_text();
                warn!(status = rejection.status().as_u16(), reason = %reason, "rejected request body");
                Err(HopeError::InvalidBody(reason))
            }
        }
    }
}
