use axum::{Json, extract::State};

use crate::db::models::{DashboardSnapshot, Leaderboard};
use crate::db::queries;
use crate::error::HopeError;
use crate::router::HopeState;

/// GET /api/dashboard_data
pub async fn dashboard_data(
    State(state): State<HopeState>,
) -> Result<Json<DashboardSnapshot>, HopeError> {
    let mut conn = state.db.acquire().await?;
    let result = queries::dashboard(&mut conn).await;
    conn.release().await;

    let snapshot = result.map_err(|e| e.during("fetching dashboard data"))?;
    Ok(Json(snapshot))
}

/// GET /api/leaderboard_data
pub async fn leaderboard_data(
    State(state): State<HopeState>,
) -> Result<Json<Leaderboard>, HopeError> {
    let mut conn = state.db.acquire().await?;
    let result = queries::leaderboard(&mut conn).await;
    conn.release().await;

    let board = result.map_err(|e| e.during("fetching leaderboard data"))?;
    Ok(Json(board))
}
