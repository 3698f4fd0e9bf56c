use pcapi_core::app_config::Config;
use pcapi_core::ReimbursementError;
use pcapi_finance::{
    CapAccumulator, ReimbursementRule, RuleCatalog, RuleKind, SequenceProcessor,
};
use pcapi_shared::Booking;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn physical(offerer_id: Uuid, value: Decimal) -> Booking {
    Booking::new(offerer_id, value, 1, false)
}

fn digital(offerer_id: Uuid, value: Decimal) -> Booking {
    Booking::new(offerer_id, value, 1, true)
}

#[test]
fn test_single_physical_booking() {
    let catalog = RuleCatalog::standard();
    let bookings = vec![physical(Uuid::new_v4(), dec!(100))];

    let decisions = SequenceProcessor::new(&catalog).process(&bookings).unwrap();

    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].rule.kind, RuleKind::PhysicalOffers);
    assert_eq!(decisions[0].reimbursed_amount, dec!(100));
    assert_eq!(
        decisions[0].rule_description,
        "Remboursement total pour les offres physiques"
    );
}

#[test]
fn test_single_digital_booking() {
    let catalog = RuleCatalog::standard();
    let bookings = vec![digital(Uuid::new_v4(), dec!(50))];

    let decisions = SequenceProcessor::new(&catalog).process(&bookings).unwrap();

    assert_eq!(decisions[0].rule.kind, RuleKind::DigitalThings);
    assert_eq!(decisions[0].reimbursed_amount, dec!(0));
    assert_eq!(
        decisions[0].rule_description,
        "Pas de remboursement pour les offres digitales"
    );
}

#[test]
fn test_sequence_crossing_the_cap() {
    let catalog = RuleCatalog::standard();
    let offerer_id = Uuid::new_v4();
    let bookings = vec![
        physical(offerer_id, dec!(20000)),
        physical(offerer_id, dec!(3500)),
        physical(offerer_id, dec!(10)),
    ];

    let mut accumulator = CapAccumulator::new();
    let decisions = SequenceProcessor::new(&catalog)
        .process_with(&bookings, &mut accumulator)
        .unwrap();

    assert_eq!(decisions[0].reimbursed_amount, dec!(20000));
    assert_eq!(decisions[1].reimbursed_amount, dec!(0));
    assert_eq!(decisions[2].reimbursed_amount, dec!(0));
    assert_eq!(decisions[1].rule.kind, RuleKind::MaxReimbursementByOfferer);
    assert_eq!(
        decisions[2].rule_description,
        "Pas de remboursement au dessus du plafond de 23 000 € par offreur"
    );
    assert_eq!(accumulator.total(), dec!(23510));
}

#[test]
fn test_mixed_sequence() {
    let catalog = RuleCatalog::standard();
    let offerer_id = Uuid::new_v4();
    let bookings = vec![
        physical(offerer_id, dec!(5000)),
        digital(offerer_id, dec!(5000)),
        physical(offerer_id, dec!(5000)),
    ];

    let mut accumulator = CapAccumulator::new();
    let decisions = SequenceProcessor::new(&catalog)
        .process_with(&bookings, &mut accumulator)
        .unwrap();

    let elected: Vec<(RuleKind, Decimal)> = decisions
        .iter()
        .map(|d| (d.rule.kind, d.reimbursed_amount))
        .collect();
    assert_eq!(
        elected,
        vec![
            (RuleKind::PhysicalOffers, dec!(5000)),
            (RuleKind::DigitalThings, dec!(0)),
            (RuleKind::PhysicalOffers, dec!(5000)),
        ]
    );
    assert_eq!(accumulator.total(), dec!(10000));
}

#[test]
fn test_empty_sequence() {
    let catalog = RuleCatalog::standard();
    let bookings: Vec<Booking> = Vec::new();
    assert!(SequenceProcessor::new(&catalog).process(&bookings).unwrap().is_empty());
}

#[test]
fn test_reaching_exactly_the_cap_is_reimbursed() {
    let catalog = RuleCatalog::standard();
    let offerer_id = Uuid::new_v4();
    let bookings = vec![physical(offerer_id, dec!(22999.99)), physical(offerer_id, dec!(0.01))];

    let decisions = SequenceProcessor::new(&catalog).process(&bookings).unwrap();

    assert_eq!(decisions[1].rule.kind, RuleKind::PhysicalOffers);
    assert_eq!(decisions[1].reimbursed_amount, dec!(0.01));
}

#[test]
fn test_exceeding_the_cap_by_a_cent_caps_that_booking() {
    let catalog = RuleCatalog::standard();
    let offerer_id = Uuid::new_v4();
    let bookings = vec![physical(offerer_id, dec!(22999.99)), physical(offerer_id, dec!(0.02))];

    let decisions = SequenceProcessor::new(&catalog).process(&bookings).unwrap();

    assert_eq!(decisions[0].reimbursed_amount, dec!(22999.99));
    assert_eq!(decisions[1].rule.kind, RuleKind::MaxReimbursementByOfferer);
    assert_eq!(decisions[1].reimbursed_amount, dec!(0));
}

#[test]
fn test_quantity_feeds_value_and_cap() {
    let catalog = RuleCatalog::standard();
    let offerer_id = Uuid::new_v4();
    let bookings = vec![
        Booking::new(offerer_id, dec!(11500), 2, false),
        Booking::new(offerer_id, dec!(1), 1, false),
    ];

    let decisions = SequenceProcessor::new(&catalog).process(&bookings).unwrap();

    assert_eq!(decisions[0].reimbursed_amount, dec!(23000));
    assert!(decisions[1].is_capped());
}

#[test]
fn test_configured_cap() {
    let config = Config::from_toml("[reimbursement]\nofferer_cap = \"1000\"\n").unwrap();
    let catalog = RuleCatalog::from_config(&config.reimbursement).unwrap();
    let offerer_id = Uuid::new_v4();
    let bookings = vec![physical(offerer_id, dec!(900)), physical(offerer_id, dec!(200))];

    let decisions = SequenceProcessor::new(&catalog).process(&bookings).unwrap();

    assert_eq!(decisions[0].reimbursed_amount, dec!(900));
    assert_eq!(decisions[1].reimbursed_amount, dec!(0));
    assert_eq!(
        decisions[1].rule_description,
        "Pas de remboursement au dessus du plafond de 1 000 € par offreur"
    );
}

#[test]
fn test_incomplete_catalog_aborts_batch() {
    let catalog = RuleCatalog::new(
        vec![
            ReimbursementRule::physical_offers(),
            ReimbursementRule::max_reimbursement_by_offerer(),
        ],
        dec!(23000),
    )
    .unwrap();
    let offerer_id = Uuid::new_v4();
    let orphan = digital(offerer_id, dec!(20));
    let orphan_id = orphan.id;
    let bookings = vec![physical(offerer_id, dec!(10)), orphan, physical(offerer_id, dec!(10))];

    let err = SequenceProcessor::new(&catalog).process(&bookings).unwrap_err();

    assert!(matches!(
        err,
        ReimbursementError::NoApplicableRule { booking_id } if booking_id == orphan_id
    ));
}

#[test]
fn test_negative_booking_aborts_batch() {
    let catalog = RuleCatalog::standard();
    let bookings = vec![physical(Uuid::new_v4(), dec!(-0.01))];

    let err = SequenceProcessor::new(&catalog).process(&bookings).unwrap_err();
    assert!(matches!(err, ReimbursementError::InvalidBooking { .. }));
}

#[test]
fn test_overflowing_booking_aborts_batch() {
    let catalog = RuleCatalog::standard();
    let offerer_id = Uuid::new_v4();
    let bookings = vec![
        physical(offerer_id, dec!(10)),
        Booking::new(offerer_id, Decimal::MAX, 2, false),
    ];

    let mut accumulator = CapAccumulator::new();
    let err = SequenceProcessor::new(&catalog)
        .process_with(&bookings, &mut accumulator)
        .unwrap_err();

    match err {
        ReimbursementError::InvalidBooking { booking_id, reason } => {
            assert_eq!(booking_id, bookings[1].id);
            assert_eq!(reason, "value overflow");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(accumulator.total(), dec!(10));
}

#[test]
fn test_overflowing_running_total_aborts_batch() {
    let catalog = RuleCatalog::standard();
    let offerer_id = Uuid::new_v4();
    let bookings = vec![physical(offerer_id, Decimal::MAX), physical(offerer_id, Decimal::MAX)];

    let err = SequenceProcessor::new(&catalog).process(&bookings).unwrap_err();
    assert!(matches!(err, ReimbursementError::InvalidBooking { .. }));
}
