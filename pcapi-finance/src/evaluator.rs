use crate::rules::{ReimbursementRule, RuleCatalog};
use pcapi_core::{CoreResult, ReimbursementError};
use pcapi_shared::Booking;
use rust_decimal::Decimal;

/// Elects, for one booking, the least generous of the rules that apply to it
pub struct RuleEvaluator<'c> {
    catalog: &'c RuleCatalog,
}

/// Reject bookings the engine cannot turn into a payout: negative or overflowing value.
///
/// Returns the validated value.
pub fn ensure_reimbursable(booking: &Booking) -> CoreResult<Decimal> {
    let value = booking
        .value()
        .ok_or_else(|| ReimbursementError::value_overflow(booking.id))?;
    if value < Decimal::ZERO {
        return Err(ReimbursementError::InvalidBooking {
            booking_id: booking.id,
            reason: format!("negative value {}", value),
        });
    }
    Ok(value)
}

impl<'c> RuleEvaluator<'c> {
    pub fn new(catalog: &'c RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c RuleCatalog {
        self.catalog
    }

    /// Every active, relevant rule with the amount it would reimburse, in catalog order
    pub fn candidates(
        &self,
        booking: &Booking,
        cumulative_physical_value: Decimal,
    ) -> CoreResult<Vec<(ReimbursementRule, Decimal)>> {
        let mut candidates = Vec::new();

        for rule in self.catalog.all_rules() {
            if !rule.is_active_at(booking.date_created) {
                continue;
            }

            if rule.is_relevant(booking, cumulative_physical_value, self.catalog.cap()) {
                candidates.push((*rule, rule.apply(booking)?));
            }
        }

        Ok(candidates)
    }

    /// Pick the minimum candidate amount; on a tie the earliest rule in the catalog wins
    pub fn evaluate(
        &self,
        booking: &Booking,
        cumulative_physical_value: Decimal,
    ) -> CoreResult<(ReimbursementRule, Decimal)> {
        let value = ensure_reimbursable(booking)?;
        self.elect(booking, value, cumulative_physical_value)
    }

    /// Election for a booking already checked by [`ensure_reimbursable`]
    pub(crate) fn elect(
        &self,
        booking: &Booking,
        value: Decimal,
        cumulative_physical_value: Decimal,
    ) -> CoreResult<(ReimbursementRule, Decimal)> {
        // min_by keeps the first of several equal elements
        self.candidates(booking, cumulative_physical_value)?
            .into_iter()
            .min_by(|a, b| a.1.cmp(&b.1))
            .ok_or_else(|| {
                tracing::error!(
                    "No reimbursement rule applies to booking {} (digital: {}, value: {})",
                    booking.id,
                    booking.is_digital,
                    value
                );
                ReimbursementError::NoApplicableRule {
                    booking_id: booking.id,
                }
            })
    }
}
