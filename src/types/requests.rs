//! Inbound JSON bodies and their validation.
//!
//! Every request type deserializes leniently (all fields optional) and is
//! then turned into a validated value by `validate`, so that a missing field
//! produces the endpoint's own 400 message rather than a serde error.

use serde::Deserialize;
use serde_json::Value;

use crate::error::HopeError;

pub const GENERAL_TARGET: &str = "general";
pub const ANONYMOUS_DONOR: &str = "Anonymous";

/// Where a donation goes: the unattributed fund or one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationTarget {
    General,
    Student(i64),
}

impl DonationTarget {
    /// Resolve a raw `target` value. `"general"` is the fund marker; anything
    /// else must be an integer or a string holding one.
    pub fn parse(raw: &Value) -> Result<Self, HopeError> {
        if raw.as_str() == Some(GENERAL_TARGET) {
            return Ok(DonationTarget::General);
        }
        parse_student_id(raw)
            .map(DonationTarget::Student)
            .ok_or(HopeError::InvalidDonationTarget)
    }

    pub fn student_id(&self) -> Option<i64> {
        match self {
            DonationTarget::General => None,
            DonationTarget::Student(id) => Some(*id),
        }
    }

    /// Value written to `donations.donation_target`.
    pub fn as_stored(&self) -> String {
        match self {
            DonationTarget::General => GENERAL_TARGET.to_string(),
            DonationTarget::Student(id) => id.to_string(),
        }
    }
}

/// Accept `7` or `"7"`; reject floats, other strings and other JSON types.
pub fn parse_student_id(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Whole number from `7`, `7.0` or `"7"`.
fn parse_whole_number(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Donor names arrive as strings, but scalar values are stored as their text.
fn donor_name(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => required_text(Some(s.clone())),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// JSON "falsy" check: null, false, 0, "" and empty containers.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn required_text(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_amount(raw: &Value) -> Result<f64, HopeError> {
    let amount = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match amount {
        Some(a) if a.is_finite() && a > 0.0 => Ok(a),
        _ => Err(HopeError::InvalidAmount),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DonationRequest {
    #[serde(default)]
    pub donor_name: Value,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub target: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDonation {
    pub donor_name: String,
    pub amount: f64,
    pub target: DonationTarget,
}

impl DonationRequest {
    pub fn validate(self) -> Result<NewDonation, HopeError> {
        if is_blank(&self.amount) || is_blank(&self.target) {
            return Err(HopeError::MissingFields("Amount and target are required"));
        }
        let amount = parse_amount(&self.amount)?;
        let target = DonationTarget::parse(&self.target)?;
        let donor_name =
            donor_name(&self.donor_name).unwrap_or_else(|| ANONYMOUS_DONOR.to_string());
        Ok(NewDonation {
            donor_name,
            amount,
            target,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EnrollmentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub track: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub track: String,
}

impl EnrollmentRequest {
    pub fn validate(self) -> Result<NewStudent, HopeError> {
        match (
            required_text(self.name),
            required_text(self.email),
            required_text(self.track),
        ) {
            (Some(name), Some(email), Some(track)) => Ok(NewStudent { name, email, track }),
            _ => Err(HopeError::MissingFields("Missing required fields")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VolunteerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVolunteer {
    pub name: String,
    pub email: String,
    pub skills: Option<String>,
}

impl VolunteerRequest {
    pub fn validate(self) -> Result<NewVolunteer, HopeError> {
        match (required_text(self.name), required_text(self.email)) {
            (Some(name), Some(email)) => Ok(NewVolunteer {
                name,
                email,
                skills: required_text(self.skills),
            }),
            _ => Err(HopeError::MissingFields("Name and email are required")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStory {
    pub name: String,
    pub title: String,
    pub text: String,
}

impl StoryRequest {
    pub fn validate(self) -> Result<NewStory, HopeError> {
        match (
            required_text(self.name),
            required_text(self.title),
            required_text(self.text),
        ) {
            (Some(name), Some(title), Some(text)) => Ok(NewStory { name, title, text }),
            _ => Err(HopeError::MissingFields("All fields are required!")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(self) -> Result<NewContactMessage, HopeError> {
        match (
            required_text(self.name),
            required_text(self.email),
            required_text(self.message),
        ) {
            (Some(name), Some(email), Some(message)) => Ok(NewContactMessage {
                name,
                email,
                message,
            }),
            _ => Err(HopeError::MissingFields("Missing required fields")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizSubmission {
    #[serde(default)]
    pub student_id: Value,
    #[serde(default)]
    pub score: Value,
    /// Only its presence is checked.
    #[serde(default)]
    pub total_questions: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub student_id: i64,
    pub score: i64,
}

impl QuizSubmission {
    pub fn validate(self) -> Result<QuizScore, HopeError> {
        let student_id = if is_blank(&self.student_id) {
            None
        } else {
            parse_student_id(&self.student_id)
        };
        let (Some(student_id), false, false) = (
            student_id,
            self.score.is_null(),
            self.total_questions.is_null(),
        ) else {
            return Err(HopeError::MissingFields(
                "Missing student_id, score, or total_questions",
            ));
        };
        let score = parse_whole_number(&self.score).ok_or(HopeError::InvalidQuizScore)?;
        Ok(QuizScore { student_id, score })
    }
}
