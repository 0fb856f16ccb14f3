use serde::{Deserialize, Serialize};

/// Plain acknowledgement: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationReceipt {
    pub message: String,
    /// Row id of the recorded donation.
    pub invoice_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrollmentReceipt {
    pub message: String,
    pub student_id: i64,
}
