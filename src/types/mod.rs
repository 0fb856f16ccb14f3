//! Request payloads and response envelopes of the JSON API.

pub mod requests;
pub mod responses;

pub use requests::{
    ContactRequest, DonationRequest, DonationTarget, EnrollmentRequest, QuizSubmission,
    StoryRequest, VolunteerRequest,
};
pub use responses::{Confirmation, DonationReceipt, EnrollmentReceipt};
