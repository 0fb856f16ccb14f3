use axum::{Json, extract::State, http::StatusCode};

use crate::db::queries;
use crate::error::HopeError;
use crate::middleware::JsonBody;
use crate::router::HopeState;
use crate::types::{Confirmation, VolunteerRequest};

/// POST /api/apply_volunteer
pub async fn apply_volunteer(
    State(state): State<HopeState>,
    JsonBody(req): JsonBody<VolunteerRequest>,
) -> Result<(StatusCode, Json<Confirmation>), HopeError> {
    let volunteer = req.validate()?;

    let mut conn = state.db.acquire().await?;
    let result = queries::insert_volunteer(&mut conn, &volunteer).await;
    conn.release().await;

    result.map_err(|e| e.during("submitting application"))?;
    Ok((
        StatusCode::CREATED,
        Json(Confirmation::new(
            "Volunteer application submitted successfully!",
        )),
    ))
}
