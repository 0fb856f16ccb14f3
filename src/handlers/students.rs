use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use tracing::{debug, warn};

use crate::db::models::StudentProfile;
use crate::db::queries;
use crate::error::{HopeError, StudentApiError};
use crate::middleware::JsonBody;
use crate::router::HopeState;
use crate::types::{Confirmation, EnrollmentReceipt, EnrollmentRequest, QuizSubmission};

/// POST /api/enroll_student
pub async fn enroll_student(
    State(state): State<HopeState>,
    JsonBody(req): JsonBody<EnrollmentRequest>,
) -> Result<(StatusCode, Json<EnrollmentReceipt>), HopeError> {
    let student = req.validate()?;

    let mut conn = state.db.acquire().await?;
    let result = queries::insert_student(&mut conn, &student).await;
    conn.release().await;

    let student_id = result.map_err(|e| e.during("enrolling student"))?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollmentReceipt {
            message: "Student enrolled successfully!".to_string(),
            student_id,
        }),
    ))
}

/// GET /api/student/{student_id}
///
/// A path segment that is not an integer matches no student.
pub async fn get_student(
    State(state): State<HopeState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<StudentProfile>, StudentApiError> {
    let Ok(Path(student_id)) = path else {
        debug!("non-integer student id in path");
        return Err(HopeError::NotFound("Student").into());
    };

    let mut conn = state.db.acquire().await?;
    let result = queries::get_student(&mut conn, student_id).await;
    conn.release().await;

    let student = result.map_err(|e| e.during("fetching student data"))?;
    Ok(Json(student))
}

/// POST /api/submit_quiz
pub async fn submit_quiz(
    State(state): State<HopeState>,
    body: Result<JsonBody<QuizSubmission>, HopeError>,
) -> Result<Json<Confirmation>, StudentApiError> {
    let JsonBody(req) = body?;
    let quiz = req.validate()?;

    let mut conn = state.db.acquire().await?;
    let result = queries::record_quiz_score(&mut conn, &quiz).await;
    conn.release().await;

    let touched = result.map_err(|e| e.during("saving quiz score"))?;
    if touched == 0 {
        warn!(student_id = quiz.student_id, "quiz submitted for unknown student");
    }
    Ok(Json(Confirmation::new(format!(
        "Score saved successfully for student ID {}",
        quiz.student_id
    ))))
}
