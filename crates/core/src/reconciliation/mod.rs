//! Month-by-month reconciliation of actual against quoted cost.
//!
//! Every contract is reconciled over exactly [`LEDGER_MONTHS`] months from
//! its start month. Each month resolves, in priority order, to a historical
//! override, a live billing lookup, or an estimate carried forward from the
//! last non-zero actual.

pub mod engine;
pub mod ledger;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::ReconciliationEngine;
pub use ledger::{LEDGER_MONTHS, Ledger};
pub use types::{ContractSummary, CostStatus, MonthlyRecord};
