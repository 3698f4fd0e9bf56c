use crate::decision::{ReimbursementDecision, ReimbursementRecord};
use crate::processor::SequenceProcessor;
use crate::rules::{counts_toward_cap, RuleCatalog};
use chrono::Utc;
use pcapi_core::{CoreResult, ReimbursementError};
use pcapi_shared::Booking;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Decisions for every booking of one offerer, chronologically ordered
#[derive(Debug, Clone)]
pub struct OffererReimbursement<'a> {
    pub offerer_id: Uuid,
    pub decisions: Vec<ReimbursementDecision<'a>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReimbursementSummary {
    pub offerer_id: Uuid,
    pub booking_count: usize,
    pub total_booked: Decimal,
    /// Revenue counted toward the cap
    pub total_physical: Decimal,
    pub total_reimbursed: Decimal,
    pub capped_count: usize,
}

impl<'a> OffererReimbursement<'a> {
    pub fn summary(&self) -> CoreResult<ReimbursementSummary> {
        let mut total_booked = Decimal::ZERO;
        let mut total_physical = Decimal::ZERO;
        let mut total_reimbursed = Decimal::ZERO;
        let mut capped_count = 0;

        for decision in &self.decisions {
            let booking = decision.booking;
            let overflow = || ReimbursementError::value_overflow(booking.id);
            let value = booking.value().ok_or_else(overflow)?;

            total_booked = total_booked.checked_add(value).ok_or_else(overflow)?;
            if counts_toward_cap(booking) {
                total_physical = total_physical.checked_add(value).ok_or_else(overflow)?;
            }
            total_reimbursed = total_reimbursed
                .checked_add(decision.reimbursed_amount)
                .ok_or_else(overflow)?;
            if decision.is_capped() {
                capped_count += 1;
            }
        }

        Ok(ReimbursementSummary {
            offerer_id: self.offerer_id,
            booking_count: self.decisions.len(),
            total_booked,
            total_physical,
            total_reimbursed,
            capped_count,
        })
    }

    pub fn records(&self) -> Vec<ReimbursementRecord> {
        self.decisions.iter().map(|d| d.as_record()).collect()
    }

    /// Report payload handed to the finance export
    pub fn report(&self) -> CoreResult<serde_json::Value> {
        Ok(serde_json::json!({
            "offerer_id": self.offerer_id,
            "report_date": Utc::now().to_rfc3339(),
            "summary": self.summary()?,
            "reimbursements": self.records(),
        }))
    }
}

/// Split a mixed booking list by offerer and reimburse each offerer separately.
///
/// Offerers come out in order of first appearance; each offerer's bookings are
/// sorted by creation date (stable) and get their own zeroed running total.
pub fn reimburse_by_offerer<'a>(
    catalog: &RuleCatalog,
    bookings: &'a [Booking],
) -> CoreResult<Vec<OffererReimbursement<'a>>> {
    let mut groups: Vec<(Uuid, Vec<&'a Booking>)> = Vec::new();
    let mut slots: HashMap<Uuid, usize> = HashMap::new();

    for booking in bookings {
        let slot = *slots.entry(booking.offerer_id).or_insert_with(|| {
            groups.push((booking.offerer_id, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(booking);
    }

    let processor = SequenceProcessor::new(catalog);
    groups
        .into_iter()
        .map(|(offerer_id, mut group)| -> CoreResult<OffererReimbursement<'a>> {
            group.sort_by_key(|b| b.date_created);
            let decisions = processor.process(group)?;
            Ok(OffererReimbursement {
                offerer_id,
                decisions,
            })
        })
        .collect()
}
