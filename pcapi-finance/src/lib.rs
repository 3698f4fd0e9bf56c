pub mod rules;
pub mod accumulator;
pub mod evaluator;
pub mod processor;
pub mod decision;
pub mod settlement;

pub use rules::{ReimbursementRule, RuleCatalog, RuleKind};
pub use accumulator::CapAccumulator;
pub use evaluator::RuleEvaluator;
pub use processor::SequenceProcessor;
pub use decision::{ReimbursementDecision, ReimbursementRecord};
pub use settlement::{reimburse_by_offerer, OffererReimbursement, ReimbursementSummary};
