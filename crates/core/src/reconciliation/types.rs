//! Reconciliation result types.

use chrono::NaiveDate;
use costrecon_shared::Month;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a month's actual amount was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostStatus {
    /// Returned by the billing API.
    Billed,
    /// Taken from the contract's historical overrides.
    BilledLegacy,
    /// Unknown; carried forward from the last known actual.
    Estimated,
}

impl CostStatus {
    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Billed => "BILLED",
            Self::BilledLegacy => "BILLED_LEGACY",
            Self::Estimated => "ESTIMATED",
        }
    }
}

impl std::fmt::Display for CostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One month of the reconciliation ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Billing month.
    pub month: Month,
    /// Actual amount, rounded to 2 decimals.
    #[serde(with = "rust_decimal::serde::float")]
    pub actual: Decimal,
    /// Quoted amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub quoted: Decimal,
    /// `actual - quoted`, rounded to 2 decimals.
    #[serde(with = "rust_decimal::serde::float")]
    pub variance: Decimal,
    /// Where the actual amount came from.
    pub status: CostStatus,
}

/// Twelve-month reconciliation of one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSummary {
    /// Contract identifier.
    pub contract_id: String,
    /// Contract start date as configured.
    pub start_date: NaiveDate,
    /// Monthly records in chronological order.
    pub monthly: Vec<MonthlyRecord>,
    /// Sum of unrounded actuals, rounded to 2 decimals.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_actual: Decimal,
    /// Sum of quoted amounts, rounded to 2 decimals.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_quoted: Decimal,
    /// `total_actual - total_quoted` on unrounded sums, rounded to 2 decimals.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_variance: Decimal,
}
