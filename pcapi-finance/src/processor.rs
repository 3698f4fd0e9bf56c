use crate::accumulator::CapAccumulator;
use crate::decision::ReimbursementDecision;
use crate::evaluator::{ensure_reimbursable, RuleEvaluator};
use crate::rules::RuleCatalog;
use pcapi_core::CoreResult;
use pcapi_shared::Booking;

/// Walks an ordered booking batch and emits one decision per booking, in input order.
///
/// Callers wanting per-offerer caps run one batch per offerer, chronologically
/// ordered (see [`crate::settlement::reimburse_by_offerer`]).
pub struct SequenceProcessor<'c> {
    evaluator: RuleEvaluator<'c>,
}

impl<'c> SequenceProcessor<'c> {
    pub fn new(catalog: &'c RuleCatalog) -> Self {
        Self {
            evaluator: RuleEvaluator::new(catalog),
        }
    }

    /// Process a batch from a zeroed running total
    pub fn process<'b, I>(&self, bookings: I) -> CoreResult<Vec<ReimbursementDecision<'b>>>
    where
        I: IntoIterator<Item = &'b Booking>,
    {
        let mut accumulator = CapAccumulator::new();
        self.process_with(bookings, &mut accumulator)
    }

    /// Process a batch against a caller-owned running total.
    ///
    /// Each booking is added to the total before it is evaluated, so the booking
    /// that crosses the cap is itself capped. Any error aborts the whole batch.
    pub fn process_with<'b, I>(
        &self,
        bookings: I,
        accumulator: &mut CapAccumulator,
    ) -> CoreResult<Vec<ReimbursementDecision<'b>>>
    where
        I: IntoIterator<Item = &'b Booking>,
    {
        let catalog = self.evaluator.catalog();
        let cap = catalog.cap();
        let bookings = bookings.into_iter();
        let mut decisions = Vec::with_capacity(bookings.size_hint().0);

        for booking in bookings {
            let value = ensure_reimbursable(booking)?;

            let was_capped = accumulator.total() > cap;
            let cumulative = accumulator.record(booking)?;
            if !was_capped && cumulative > cap {
                tracing::warn!(
                    "Offerer {} crossed the {} reimbursement cap with booking {} (cumulative: {})",
                    booking.offerer_id,
                    cap,
                    booking.id,
                    cumulative
                );
            }

            let (rule, amount) = self.evaluator.elect(booking, value, cumulative)?;
            tracing::debug!(
                booking_id = %booking.id,
                rule = ?rule.kind,
                amount = %amount,
                "reimbursement elected"
            );

            decisions.push(ReimbursementDecision::new(
                booking,
                rule,
                catalog.describe(&rule),
                amount,
            ));
        }

        tracing::info!(
            "Computed {} reimbursement decisions (cumulative physical value: {})",
            decisions.len(),
            accumulator.total()
        );

        Ok(decisions)
    }
}
