use crate::rules::{ReimbursementRule, RuleKind};
use chrono::{DateTime, Utc};
use pcapi_shared::Booking;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The rule elected for one booking and the amount owed to its offerer.
///
/// Not serializable: exports go through [`ReimbursementRecord`], which withholds
/// the token of unused bookings.
#[derive(Debug, Clone)]
pub struct ReimbursementDecision<'a> {
    pub booking: &'a Booking,
    pub rule: ReimbursementRule,
    pub rule_description: String,
    pub reimbursed_amount: Decimal,
}

/// Flat export row for finance reporting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReimbursementRecord {
    pub booking_id: Uuid,
    pub offerer_id: Uuid,
    /// Only disclosed once the booking has been used
    pub token: Option<String>,
    pub amount: Decimal,
    pub quantity: u32,
    pub is_digital: bool,
    pub is_used: bool,
    pub date_created: DateTime<Utc>,
    pub reimbursed_amount: Decimal,
    pub reimbursement_rule: String,
}

impl<'a> ReimbursementDecision<'a> {
    pub fn new(
        booking: &'a Booking,
        rule: ReimbursementRule,
        rule_description: String,
        reimbursed_amount: Decimal,
    ) -> Self {
        Self {
            booking,
            rule,
            rule_description,
            reimbursed_amount,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.rule.kind == RuleKind::MaxReimbursementByOfferer
    }

    pub fn as_record(&self) -> ReimbursementRecord {
        let booking = self.booking;
        ReimbursementRecord {
            booking_id: booking.id,
            offerer_id: booking.offerer_id,
            token: booking
                .is_used
                .then(|| booking.token.expose().to_string()),
            amount: booking.amount,
            quantity: booking.quantity,
            is_digital: booking.is_digital,
            is_used: booking.is_used,
            date_created: booking.date_created,
            reimbursed_amount: self.reimbursed_amount,
            reimbursement_rule: self.rule_description.clone(),
        }
    }
}
