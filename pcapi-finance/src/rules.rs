use chrono::{DateTime, Utc};
use pcapi_core::app_config::{default_offerer_cap, ReimbursementConfig};
use pcapi_core::{CoreResult, ReimbursementError};
use pcapi_shared::Booking;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The closed set of reimbursement policies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    /// Digital goods are never reimbursed
    DigitalThings,
    /// Physical offers are reimbursed at full value
    PhysicalOffers,
    /// Nothing is reimbursed once an offerer's physical revenue exceeds the cap
    MaxReimbursementByOfferer,
}

/// A reimbursement policy and the period during which it applies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReimbursementRule {
    pub kind: RuleKind,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
}

/// Whether a booking's value feeds the per-offerer cap.
///
/// Shared by the cap rule and the running total so both classify bookings the same way.
pub fn counts_toward_cap(booking: &Booking) -> bool {
    !booking.is_digital
}

impl ReimbursementRule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            valid_from: None,
            valid_until: None,
        }
    }

    pub fn digital_things() -> Self {
        Self::new(RuleKind::DigitalThings)
    }

    pub fn physical_offers() -> Self {
        Self::new(RuleKind::PhysicalOffers)
    }

    pub fn max_reimbursement_by_offerer() -> Self {
        Self::new(RuleKind::MaxReimbursementByOfferer)
    }

    /// Restrict the rule to `[valid_from, valid_until)`
    pub fn valid_between(
        mut self,
        valid_from: Option<DateTime<Utc>>,
        valid_until: Option<DateTime<Utc>>,
    ) -> Self {
        self.valid_from = valid_from;
        self.valid_until = valid_until;
        self
    }

    pub fn rate(&self) -> Decimal {
        match self.kind {
            RuleKind::DigitalThings => Decimal::ZERO,
            RuleKind::PhysicalOffers => Decimal::ONE,
            RuleKind::MaxReimbursementByOfferer => Decimal::ZERO,
        }
    }

    /// Audit label attached to every decision elected under this rule
    pub fn description(&self, cap: Decimal) -> String {
        match self.kind {
            RuleKind::DigitalThings => "Pas de remboursement pour les offres digitales".to_string(),
            RuleKind::PhysicalOffers => "Remboursement total pour les offres physiques".to_string(),
            RuleKind::MaxReimbursementByOfferer => format!(
                "Pas de remboursement au dessus du plafond de {} € par offreur",
                format_euros(cap)
            ),
        }
    }

    pub fn is_active_at(&self, instant: DateTime<Utc>) -> bool {
        let started = self.valid_from.map_or(true, |from| from <= instant);
        let not_ended = self.valid_until.map_or(true, |until| instant < until);
        started && not_ended
    }

    /// `cumulative_value` already includes this booking when it counts toward the cap
    pub fn is_relevant(&self, booking: &Booking, cumulative_value: Decimal, cap: Decimal) -> bool {
        match self.kind {
            RuleKind::DigitalThings => booking.is_digital,
            RuleKind::PhysicalOffers => counts_toward_cap(booking),
            RuleKind::MaxReimbursementByOfferer => {
                counts_toward_cap(booking) && cumulative_value > cap
            }
        }
    }

    pub fn apply(&self, booking: &Booking) -> CoreResult<Decimal> {
        booking
            .value()
            .and_then(|value| value.checked_mul(self.rate()))
            .ok_or_else(|| ReimbursementError::value_overflow(booking.id))
    }
}

/// French grouping: 23000 -> "23 000", 1500.5 -> "1 500,50"
fn format_euros(amount: Decimal) -> String {
    let text = if amount.fract().is_zero() {
        amount.trunc().normalize().to_string()
    } else {
        format!("{:.2}", amount)
    };
    let (units, cents) = match text.split_once('.') {
        Some((units, cents)) => (units, Some(cents)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    match cents {
        Some(cents) => format!("{},{}", grouped, cents),
        None => grouped,
    }
}

/// Ordered, closed set of rules the evaluator scans.
///
/// Order only matters for ties between equal amounts: the first rule wins.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<ReimbursementRule>,
    cap: Decimal,
}

fn standard_rules() -> Vec<ReimbursementRule> {
    vec![
        ReimbursementRule::digital_things(),
        ReimbursementRule::physical_offers(),
        ReimbursementRule::max_reimbursement_by_offerer(),
    ]
}

impl RuleCatalog {
    /// Built-in rules with the 23 000 € cap
    pub fn standard() -> Self {
        Self {
            rules: standard_rules(),
            cap: default_offerer_cap(),
        }
    }

    pub fn new(rules: Vec<ReimbursementRule>, cap: Decimal) -> CoreResult<Self> {
        if rules.is_empty() {
            return Err(ReimbursementError::Configuration(
                "rule catalog is empty".to_string(),
            ));
        }
        if cap < Decimal::ZERO {
            return Err(ReimbursementError::Configuration(format!(
                "offerer cap must not be negative, got {}",
                cap
            )));
        }
        for rule in &rules {
            if let (Some(from), Some(until)) = (rule.valid_from, rule.valid_until) {
                if from >= until {
                    return Err(ReimbursementError::Configuration(format!(
                        "{:?} validity window is empty: {} >= {}",
                        rule.kind, from, until
                    )));
                }
            }
        }

        Ok(Self { rules, cap })
    }

    pub fn from_config(config: &ReimbursementConfig) -> CoreResult<Self> {
        Self::new(standard_rules(), config.offerer_cap)
    }

    /// Every registered rule, active or not, in definition order
    pub fn all_rules(&self) -> &[ReimbursementRule] {
        &self.rules
    }

    pub fn cap(&self) -> Decimal {
        self.cap
    }

    pub fn describe(&self, rule: &ReimbursementRule) -> String {
        rule.description(self.cap)
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
