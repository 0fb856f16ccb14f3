use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Student columns shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct StudentSummary {
    pub student_id: i64,
    pub name: String,
    pub progress: i64,
    pub last_quiz_score: Option<i64>,
    pub donations_received: f64,
    pub donation_target_amount: f64,
}

/// Student columns returned by the single-student lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct StudentProfile {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub track: String,
    pub last_quiz_score: Option<i64>,
    pub progress: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct RecentDonation {
    pub donor_name: String,
    pub amount: f64,
    pub donation_target: String,
    pub donation_date: DateTime<Utc>,
}

/// One leaderboard row: donations summed per donor name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DonorStanding {
    pub name: String,
    pub total_donated: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct VolunteerStanding {
    pub name: String,
    pub points: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbStory {
    pub name: String,
    pub title: String,
    pub story_text: String,
    pub submission_date: DateTime<Utc>,
}

/// Aggregate snapshot behind `GET /api/dashboard_data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub students: Vec<StudentSummary>,
    pub total_donations: f64,
    pub general_fund: f64,
    pub recent_donations: Vec<RecentDonation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Leaderboard {
    pub donors: Vec<DonorStanding>,
    pub volunteers: Vec<VolunteerStanding>,
}
