pub mod app_config;

use uuid::Uuid;

/// Failures of reimbursement computation. Any of them aborts the whole batch.
#[derive(Debug, thiserror::Error)]
pub enum ReimbursementError {
    #[error("Invalid reimbursement configuration: {0}")]
    Configuration(String),
    /// The rule catalog no longer covers every booking classification
    #[error("No applicable reimbursement rule for booking {booking_id}")]
    NoApplicableRule { booking_id: Uuid },
    #[error("Invalid booking {booking_id}: {reason}")]
    InvalidBooking { booking_id: Uuid, reason: String },
}

impl ReimbursementError {
    pub fn value_overflow(booking_id: Uuid) -> Self {
        Self::InvalidBooking {
            booking_id,
            reason: "value overflow".to_string(),
        }
    }
}

impl From<config::ConfigError> for ReimbursementError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, ReimbursementError>;
