use axum::{Json, extract::State, http::StatusCode};

use crate::db::models::DbStory;
use crate::db::queries;
use crate::error::HopeError;
use crate::middleware::JsonBody;
use crate::router::HopeState;
use crate::types::{Confirmation, StoryRequest};

/// POST /api/add_story
pub async fn add_story(
    State(state): State<HopeState>,
    JsonBody(req): JsonBody<StoryRequest>,
) -> Result<(StatusCode, Json<Confirmation>), HopeError> {
    let story = req.validate()?;

    let mut conn = state.db.acquire().await?;
    let result = queries::add_story(&mut conn, &story).await;
    conn.release().await;

    result.map_err(|e| e.during("adding story"))?;
    Ok((
        StatusCode::CREATED,
        Json(Confirmation::new("Thank you for sharing your story!")),
    ))
}

/// GET /api/stories, newest first.
pub async fn get_stories(State(state): State<HopeState>) -> Result<Json<Vec<DbStory>>, HopeError> {
    let mut conn = state.db.acquire().await?;
    let result = queries::list_stories(&mut conn).await;
    conn.release().await;

    let stories = result.map_err(|e| e.during("fetching stories"))?;
    Ok(Json(stories))
}
