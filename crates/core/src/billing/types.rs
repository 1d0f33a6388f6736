//! Billing query types.

use chrono::NaiveDate;
use costrecon_shared::Month;

/// Half-open date range `[start, end)` queried from the billing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BillingPeriod {
    /// Inclusive start date.
    pub start: NaiveDate,
    /// Exclusive end date.
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Creates a period from explicit bounds.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The full calendar month `month`.
    #[must_use]
    pub fn month(month: Month) -> Self {
        Self::new(month.first_day(), month.next().first_day())
    }

    /// Cache key for this period, `"{start}:{end}"` with `YYYY-MM-DD` dates.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.start, self.end)
    }
}
