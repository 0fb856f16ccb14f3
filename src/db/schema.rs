//! SQL DDL for the program database, applied at startup.

/// SQLite schema with:
/// - `students.email` and `volunteers.email` UNIQUE (duplicate signups surface as conflicts)
/// - `donations.target_student_id` referencing `students`, NULL exactly when the target is `general`
/// - timestamps stored as RFC3339 text written by the application
/// - indexes backing the newest-first listings
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    student_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    track TEXT NOT NULL,
    progress INTEGER NOT NULL DEFAULT 0,
    last_quiz_score INTEGER NULL,
    quiz_attempts INTEGER NOT NULL DEFAULT 0,
    donations_received REAL NOT NULL DEFAULT 0.0,
    donation_target_amount REAL NOT NULL DEFAULT 0.0
);

CREATE TABLE IF NOT EXISTS donations (
    donation_id INTEGER PRIMARY KEY AUTOINCREMENT,
    donor_name TEXT NOT NULL DEFAULT 'Anonymous',
    amount REAL NOT NULL,
    donation_target TEXT NOT NULL,
    target_student_id INTEGER NULL REFERENCES students(student_id),
    donation_date TEXT NOT NULL,
    CHECK ((donation_target = 'general') = (target_student_id IS NULL))
);

CREATE INDEX IF NOT EXISTS idx_donations_date ON donations(donation_date);

CREATE TABLE IF NOT EXISTS volunteers (
    volunteer_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    skills TEXT NULL,
    points INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS stories (
    story_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    title TEXT NOT NULL,
    story_text TEXT NOT NULL,
    submission_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_stories_date ON stories(submission_date);

CREATE TABLE IF NOT EXISTS contact (
    contact_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    message TEXT NOT NULL
);
"#;
