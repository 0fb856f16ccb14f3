use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::{debug, error};

pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

#[derive(Debug, ThisError)]
pub enum HopeError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Invalid donation amount")]
    InvalidAmount,

    #[error("Invalid donation target")]
    InvalidDonationTarget,

    #[error("Invalid quiz score")]
    InvalidQuizScore,

    #[error("Email already exists.")]
    EmailTaken,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] SqlxError),

    #[error("Error {action}: {source}")]
    Storage {
        action: &'static str,
        #[source]
        source: SqlxError,
    },

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl HopeError {
    /// Tag a raw database error with the operation that produced it.
    /// Other variants pass through untouched.
    pub fn during(self, action: &'static str) -> Self {
        match self {
            HopeError::DatabaseError(source) => HopeError::Storage { action, source },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HopeError::InvalidBody(_)
            | HopeError::MissingFields(_)
            | HopeError::InvalidAmount
            | HopeError::InvalidDonationTarget
            | HopeError::InvalidQuizScore => StatusCode::BAD_REQUEST,
            HopeError::EmailTaken => StatusCode::CONFLICT,
            HopeError::NotFound(_) => StatusCode::NOT_FOUND,
            HopeError::ConnectionFailed(_)
            | HopeError::Storage { .. }
            | HopeError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to clients. Storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            HopeError::ConnectionFailed(_) => "Database connection failed".to_string(),
            HopeError::Storage { action, .. } => format!("Error {action}."),
            HopeError::DatabaseError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    fn log(&self) {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "request rejected");
        }
    }
}

/// Body used by most endpoints: `{"message": "..."}`.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Body used by the student lookup endpoints: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for HopeError {
    fn into_response(self) -> Response {
        self.log();
        let body = MessageBody {
            message: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Same error set, rendered with an `error` key instead of `message`.
#[derive(Debug)]
pub struct StudentApiError(pub HopeError);

impl From<HopeError> for StudentApiError {
    fn from(err: HopeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for StudentApiError {
    fn into_response(self) -> Response {
        let StudentApiError(err) = self;
        err.log();
        let body = ErrorBody {
            error: err.public_message(),
        };
        (err.status(), Json(body)).into_response()
    }
}

/// Last-resort response for failures no handler produced (panics).
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn during_tags_only_raw_database_errors() {
        let tagged = HopeError::DatabaseError(SqlxError::RowNotFound).during("adding story");
        assert!(matches!(
            tagged,
            HopeError::Storage {
                action: "adding story",
                ..
            }
        ));
        assert_eq!(tagged.public_message(), "Error adding story.");
        assert_eq!(tagged.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let untouched = HopeError::EmailTaken.during("enrolling student");
        assert!(matches!(untouched, HopeError::EmailTaken));
        assert_eq!(untouched.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn connection_failure_hides_driver_detail() {
        let err = HopeError::ConnectionFailed(SqlxError::PoolTimedOut);
        assert_eq!(err.public_message(), "Database connection failed");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
