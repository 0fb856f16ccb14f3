//! Parameterized SQL behind every endpoint.
//!
//! Functions take a borrowed connection; acquiring and releasing it is the
//! caller's job. Writes that touch more than one statement open their own
//! transaction and settle it through [`finish`].

use chrono::Utc;
use sqlx::sqlite::SqliteConnection;
use sqlx::{Connection, Error as SqlxError};
use tracing::{debug, info};

use crate::db::connection::finish;
use crate::db::models::{
    DashboardSnapshot, DbStory, DonorStanding, Leaderboard, RecentDonation, StudentProfile,
    StudentSummary, VolunteerStanding,
};
use crate::error::HopeError;
use crate::types::requests::{
    GENERAL_TARGET, NewContactMessage, NewDonation, NewStory, NewStudent, NewVolunteer, QuizScore,
};

pub const RECENT_DONATION_LIMIT: i64 = 5;
pub const LEADERBOARD_LIMIT: i64 = 5;

/// Unique-constraint violations become `EmailTaken`; everything else stays a
/// database error.
fn map_unique_violation(err: SqlxError) -> HopeError {
    if let SqlxError::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return HopeError::EmailTaken;
    }
    HopeError::DatabaseError(err)
}

pub async fn student_exists(conn: &mut SqliteConnection, student_id: i64) -> Result<bool, HopeError> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT student_id FROM students WHERE student_id = ?")
        .bind(student_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

/// Record a donation and, for a student target, credit that student.
/// Returns the new donation id.
pub async fn record_donation(
    conn: &mut SqliteConnection,
    donation: &NewDonation,
) -> Result<i64, HopeError> {
    let student_id = donation.target.student_id();

    // Existence is checked before the write transaction; a concurrent delete of
    // the student is not guarded against.
    if let Some(id) = student_id
        && !student_exists(conn, id).await?
    {
        debug!(student_id = id, "donation target does not exist");
        return Err(HopeError::InvalidDonationTarget);
    }

    let mut tx = conn.begin().await?;
    let outcome = insert_donation(&mut tx, donation).await;
    finish(tx, outcome).await
}

async fn insert_donation(
    conn: &mut SqliteConnection,
    donation: &NewDonation,
) -> Result<i64, HopeError> {
    let student_id = donation.target.student_id();
    let result = sqlx::query(
        r#"
        INSERT INTO donations (donor_name, amount, donation_target, target_student_id, donation_date)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&donation.donor_name)
    .bind(donation.amount)
    .bind(donation.target.as_stored())
    .bind(student_id)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;
    let donation_id = result.last_insert_rowid();

    if let Some(id) = student_id {
        sqlx::query(
            "UPDATE students SET donations_received = donations_received + ? WHERE student_id = ?",
        )
        .bind(donation.amount)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    }

    info!(
        donation_id,
        amount = donation.amount,
        target = %donation.target.as_stored(),
        "donation recorded"
    );
    Ok(donation_id)
}

pub async fn insert_student(
    conn: &mut SqliteConnection,
    student: &NewStudent,
) -> Result<i64, HopeError> {
    let result = sqlx::query("INSERT INTO students (name, email, track) VALUES (?, ?, ?)")
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.track)
        .execute(&mut *conn)
        .await
        .map_err(map_unique_violation)?;
    let student_id = result.last_insert_rowid();
    info!(student_id, track = %student.track, "student enrolled");
    Ok(student_id)
}

pub async fn insert_volunteer(
    conn: &mut SqliteConnection,
    volunteer: &NewVolunteer,
) -> Result<i64, HopeError> {
    let result = sqlx::query("INSERT INTO volunteers (name, email, skills) VALUES (?, ?, ?)")
        .bind(&volunteer.name)
        .bind(&volunteer.email)
        .bind(&volunteer.skills)
        .execute(&mut *conn)
        .await
        .map_err(map_unique_violation)?;
    let volunteer_id = result.last_insert_rowid();
    info!(volunteer_id, "volunteer application stored");
    Ok(volunteer_id)
}

pub async fn dashboard(conn: &mut SqliteConnection) -> Result<DashboardSnapshot, HopeError> {
    let students: Vec<StudentSummary> = sqlx::query_as(
        r#"SELECT student_id, name, progress, last_quiz_score, donations_received,
           donation_target_amount
           FROM students ORDER BY student_id"#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let (total_donations,): (f64,) =
        sqlx::query_as("SELECT CAST(COALESCE(SUM(amount), 0) AS REAL) FROM donations")
            .fetch_one(&mut *conn)
            .await?;

    let (general_fund,): (f64,) = sqlx::query_as(
        "SELECT CAST(COALESCE(SUM(amount), 0) AS REAL) FROM donations WHERE donation_target = ?",
    )
    .bind(GENERAL_TARGET)
    .fetch_one(&mut *conn)
    .await?;

    let recent_donations: Vec<RecentDonation> = sqlx::query_as(
        r#"SELECT donor_name, amount, donation_target, donation_date
           FROM donations
           ORDER BY donation_date DESC, donation_id DESC
           LIMIT ?"#,
    )
    .bind(RECENT_DONATION_LIMIT)
    .fetch_all(&mut *conn)
    .await?;

    Ok(DashboardSnapshot {
        students,
        total_donations,
        general_fund,
        recent_donations,
    })
}

pub async fn leaderboard(conn: &mut SqliteConnection) -> Result<Leaderboard, HopeError> {
    let donors: Vec<DonorStanding> = sqlx::query_as(
        r#"SELECT donor_name AS name, CAST(SUM(amount) AS REAL) AS total_donated
           FROM donations
           GROUP BY donor_name
           ORDER BY total_donated DESC
           LIMIT ?"#,
    )
    .bind(LEADERBOARD_LIMIT)
    .fetch_all(&mut *conn)
    .await?;

    let volunteers: Vec<VolunteerStanding> =
        sqlx::query_as("SELECT name, points FROM volunteers ORDER BY points DESC LIMIT ?")
            .bind(LEADERBOARD_LIMIT)
            .fetch_all(&mut *conn)
            .await?;

    Ok(Leaderboard { donors, volunteers })
}

pub async fn add_story(conn: &mut SqliteConnection, story: &NewStory) -> Result<i64, HopeError> {
    let mut tx = conn.begin().await?;
    let outcome = sqlx::query(
        "INSERT INTO stories (name, title, story_text, submission_date) VALUES (?, ?, ?, ?)",
    )
    .bind(&story.name)
    .bind(&story.title)
    .bind(&story.text)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await
    .map(|r| r.last_insert_rowid())
    .map_err(HopeError::from);
    let story_id = finish(tx, outcome).await?;
    info!(story_id, "story added");
    Ok(story_id)
}

pub async fn list_stories(conn: &mut SqliteConnection) -> Result<Vec<DbStory>, HopeError> {
    let stories = sqlx::query_as(
        r#"SELECT name, title, story_text, submission_date
           FROM stories
           ORDER BY submission_date DESC, story_id DESC"#,
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(stories)
}

pub async fn insert_contact(
    conn: &mut SqliteConnection,
    contact: &NewContactMessage,
) -> Result<i64, HopeError> {
    let mut tx = conn.begin().await?;
    let outcome = sqlx::query("INSERT INTO contact (name, email, message) VALUES (?, ?, ?)")
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.message)
        .execute(&mut *tx)
        .await
        .map(|r| r.last_insert_rowid())
        .map_err(HopeError::from);
    let contact_id = finish(tx, outcome).await?;
    info!(contact_id, "contact message stored");
    Ok(contact_id)
}

pub async fn get_student(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<StudentProfile, HopeError> {
    let student: Option<StudentProfile> = sqlx::query_as(
        r#"SELECT student_id, name, email, track, last_quiz_score, progress
           FROM students WHERE student_id = ?"#,
    )
    .bind(student_id)
    .fetch_optional(&mut *conn)
    .await?;
    student.ok_or(HopeError::NotFound("Student"))
}

/// Apply a quiz result. Returns the number of student rows touched; an
/// unknown id touches none and is not treated as an error.
pub async fn record_quiz_score(
    conn: &mut SqliteConnection,
    quiz: &QuizScore,
) -> Result<u64, HopeError> {
    let mut tx = conn.begin().await?;
    let outcome = sqlx::query(
        r#"UPDATE students
           SET last_quiz_score = ?, quiz_attempts = quiz_attempts + 1, progress = progress + ?
           WHERE student_id = ?"#,
    )
    .bind(quiz.score)
    .bind(quiz.score)
    .bind(quiz.student_id)
    .execute(&mut *tx)
    .await
    .map(|r| r.rows_affected())
    .map_err(HopeError::from);
    let touched = finish(tx, outcome).await?;
    info!(
        student_id = quiz.student_id,
        score = quiz.score,
        touched,
        "quiz score recorded"
    );
    Ok(touched)
}
