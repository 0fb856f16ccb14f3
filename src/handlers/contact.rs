use axum::{Json, extract::State, http::StatusCode};

use crate::db::queries;
use crate::error::HopeError;
use crate::middleware::JsonBody;
use crate::router::HopeState;
use crate::types::{Confirmation, ContactRequest};

/// POST /api/send_contact
pub async fn send_contact(
    State(state): State<HopeState>,
    JsonBody(req): JsonBody<ContactRequest>,
) -> Result<(StatusCode, Json<Confirmation>), HopeError> {
    let contact = req.validate()?;

    let mut conn = state.db.acquire().await?;
    let result = queries::insert_contact(&mut conn, &contact).await;
    conn.release().await;

    result.map_err(|e| e.during("sending message"))?;
    Ok((
        StatusCode::CREATED,
        Json(Confirmation::new("Message sent successfully!")),
    ))
}
