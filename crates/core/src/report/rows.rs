//! Row shaping for contract summaries.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::reconciliation::ContractSummary;

/// Column headers, in export order.
pub const HEADER: [&str; 5] = ["Month", "Actual", "Quoted", "Variance", "Status"];

/// Label of the trailing aggregate row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// One display row: a month or the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// `"YYYY-MM"` or `"TOTAL"`.
    pub label: String,
    /// Actual amount.
    pub actual: Decimal,
    /// Quoted amount.
    pub quoted: Decimal,
    /// Variance.
    pub variance: Decimal,
    /// Status label; empty on the total row.
    pub status: String,
}

impl ReportRow {
    /// Cells in [`HEADER`] order.
    #[must_use]
    pub fn cells(&self) -> [String; 5] {
        [
            self.label.clone(),
            self.actual.to_string(),
            self.quoted.to_string(),
            self.variance.to_string(),
            self.status.clone(),
        ]
    }
}

/// Turns a [`ContractSummary`] into display rows.
pub struct ReportAssembler;

impl ReportAssembler {
    /// One row per month followed by the total row.
    #[must_use]
    pub fn to_rows(summary: &ContractSummary) -> Vec<ReportRow> {
        summary
            .monthly
            .iter()
            .map(|m| ReportRow {
                label: m.month.to_string(),
                actual: m.actual,
                quoted: m.quoted,
                variance: m.variance,
                status: m.status.as_str().to_string(),
            })
            .chain(std::iter::once(ReportRow {
                label: TOTAL_LABEL.to_string(),
                actual: summary.total_actual,
                quoted: summary.total_quoted,
                variance: summary.total_variance,
                status: String::new(),
            }))
            .collect()
    }
}
