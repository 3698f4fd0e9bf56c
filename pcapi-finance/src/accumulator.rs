use crate::rules::counts_toward_cap;
use pcapi_core::{CoreResult, ReimbursementError};
use pcapi_shared::Booking;
use rust_decimal::Decimal;

/// Running total of physical-offer revenue for one offerer batch.
///
/// Never shared between batches: each offerer/period gets its own zeroed instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapAccumulator {
    total: Decimal,
}

impl CapAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a total carried over from an earlier page of the same batch
    pub fn starting_at(total: Decimal) -> Self {
        Self { total }
    }

    /// Add the booking if it counts toward the cap and return the updated total.
    ///
    /// The total is left unchanged when the addition overflows.
    pub fn record(&mut self, booking: &Booking) -> CoreResult<Decimal> {
        if counts_toward_cap(booking) {
            let total = self.total;
            self.total = booking
                .value()
                .and_then(|value| total.checked_add(value))
                .ok_or_else(|| ReimbursementError::value_overflow(booking.id))?;
        }
        Ok(self.total)
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}
