use crate::token::BookingToken;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A confirmed reservation of a stock unit, owed back to the offerer once used
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub offerer_id: Uuid,
    pub token: BookingToken,
    /// Unit price paid by the beneficiary
    pub amount: Decimal,
    pub quantity: u32,
    /// True when the underlying offer is a purely digital good or service
    pub is_digital: bool,
    pub is_used: bool,
    pub date_created: DateTime<Utc>,
}

impl Booking {
    pub fn new(offerer_id: Uuid, amount: Decimal, quantity: u32, is_digital: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            offerer_id,
            token: BookingToken::generate(),
            amount,
            quantity,
            is_digital,
            is_used: false,
            date_created: Utc::now(),
        }
    }

    pub fn with_date_created(mut self, date_created: DateTime<Utc>) -> Self {
        self.date_created = date_created;
        self
    }

    /// Mark as used (the beneficiary picked up the good or attended the event)
    pub fn mark_used(mut self) -> Self {
        self.is_used = true;
        self
    }

    /// Reimbursable basis: unit price times quantity, `None` on overflow
    pub fn value(&self) -> Option<Decimal> {
        self.amount.checked_mul(Decimal::from(self.quantity))
    }
}
