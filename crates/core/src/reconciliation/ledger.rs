//! Ledger accumulation and rounding.

use chrono::NaiveDate;
use costrecon_shared::Month;
use rust_decimal::Decimal;

use super::types::{ContractSummary, CostStatus, MonthlyRecord};

/// Number of months in every reconciliation.
pub const LEDGER_MONTHS: u32 = 12;

/// Decimal places shown for money.
const DISPLAY_DP: u32 = 2;

/// Accumulates monthly records and running totals for one contract.
///
/// Per-month figures are rounded for display as they are recorded; the
/// totals sum the unrounded values and are rounded once in [`Ledger::finish`].
#[derive(Debug, Clone)]
pub struct Ledger {
    quoted: Decimal,
    last_actual: Decimal,
    total_actual: Decimal,
    total_quoted: Decimal,
    monthly: Vec<MonthlyRecord>,
}

impl Ledger {
    /// Starts an empty ledger for a contract quoted at `quoted` per month.
    #[must_use]
    pub fn new(quoted: Decimal) -> Self {
        Self {
            quoted,
            last_actual: Decimal::ZERO,
            total_actual: Decimal::ZERO,
            total_quoted: Decimal::ZERO,
            monthly: Vec::with_capacity(LEDGER_MONTHS as usize),
        }
    }

    /// Last positive actual recorded so far, the basis for estimates.
    #[must_use]
    pub const fn last_actual(&self) -> Decimal {
        self.last_actual
    }

    /// Records one month.
    pub fn record(&mut self, month: Month, actual: Decimal, status: CostStatus) {
        if actual > Decimal::ZERO {
            self.last_actual = actual;
        }

        self.monthly.push(MonthlyRecord {
            month,
            actual: actual.round_dp(DISPLAY_DP),
            quoted: self.quoted,
            variance: (actual - self.quoted).round_dp(DISPLAY_DP),
            status,
        });

        self.total_actual += actual;
        self.total_quoted += self.quoted;
    }

    /// Records an estimate at the last known actual.
    pub fn record_estimate(&mut self, month: Month) {
        self.record(month, self.last_actual, CostStatus::Estimated);
    }

    /// Closes the ledger into a summary.
    #[must_use]
    pub fn finish(self, contract_id: impl Into<String>, start_date: NaiveDate) -> ContractSummary {
        ContractSummary {
            contract_id: contract_id.into(),
            start_date,
            monthly: self.monthly,
            total_actual: self.total_actual.round_dp(DISPLAY_DP),
            total_quoted: self.total_quoted.round_dp(DISPLAY_DP),
            total_variance: (self.total_actual - self.total_quoted).round_dp(DISPLAY_DP),
        }
    }
}
