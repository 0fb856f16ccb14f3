use std::any::Any;

use axum::{
    Router,
    response::Response,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::db::ConnectionProvider;
use crate::error::{HopeError, internal_error_response};
use crate::handlers::{contact, dashboard, donations, home, stories, students, volunteers};

/// Shared handler state. Only the connection provider lives here; every
/// request opens its own connection from it.
#[derive(Clone)]
pub struct HopeState {
    pub db: ConnectionProvider,
}

impl HopeState {
    pub fn new(db: ConnectionProvider) -> Self {
        Self { db }
    }
}

pub fn hope_router(state: HopeState) -> Router {
    Router::new()
        .route("/", get(home::landing_page))
        .route("/api/process_donation", post(donations::process_donation))
        .route("/api/enroll_student", post(students::enroll_student))
        .route("/api/apply_volunteer", post(volunteers::apply_volunteer))
        .route("/api/dashboard_data", get(dashboard::dashboard_data))
        .route("/api/leaderboard_data", get(dashboard::leaderboard_data))
        .route("/api/add_story", post(stories::add_story))
        .route("/api/stories", get(stories::get_stories))
        .route("/api/send_contact", post(contact::send_contact))
        .route("/api/student/{student_id}", get(students::get_student))
        .route("/api/submit_quiz", post(students::submit_quiz))
        .fallback(route_not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn route_not_found() -> HopeError {
    HopeError::NotFound("Route")
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    error!(panic = %detail, "handler panicked");
    internal_error_response()
}
