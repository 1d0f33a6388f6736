//! Reconciliation engine.

use chrono::{NaiveDate, Utc};
use costrecon_shared::Month;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::ledger::{LEDGER_MONTHS, Ledger};
use super::types::{ContractSummary, CostStatus};
use crate::account::{Account, Contract};
use crate::billing::{BillingGateway, BillingPeriod};

/// Builds the 12-month actual vs quoted ledger for a contract.
#[derive(Clone)]
pub struct ReconciliationEngine {
    gateway: BillingGateway,
}

impl ReconciliationEngine {
    /// Creates an engine that resolves live months through `gateway`.
    #[must_use]
    pub fn new(gateway: BillingGateway) -> Self {
        Self { gateway }
    }

    /// The billing gateway used for live months.
    #[must_use]
    pub fn gateway(&self) -> &BillingGateway {
        &self.gateway
    }

    /// Reconciles `contract` as of today's UTC date.
    pub async fn reconcile(&self, account: &Account, contract: &Contract) -> ContractSummary {
        self.reconcile_as_of(account, contract, Utc::now().date_naive())
            .await
    }

    /// Reconciles `contract` treating `today` as the current date.
    ///
    /// Months up to and including the month containing `today` are looked up
    /// live; later months are estimated. Billing failures degrade the
    /// affected month to an estimate and are never returned.
    pub async fn reconcile_as_of(
        &self,
        account: &Account,
        contract: &Contract,
        today: NaiveDate,
    ) -> ContractSummary {
        let current = Month::containing(today);
        let start = contract.start_month();
        let mut ledger = Ledger::new(contract.quoted_cost);

        for i in 0..LEDGER_MONTHS {
            let month = start.plus(i);

            if let Some(actual) = contract.historical_cost(month) {
                ledger.record(month, actual, CostStatus::BilledLegacy);
            } else if month <= current {
                match self.fetch_month(account, month).await {
                    Some(actual) => ledger.record(month, actual, CostStatus::Billed),
                    None => ledger.record_estimate(month),
                }
            } else {
                ledger.record_estimate(month);
            }
        }

        let summary = ledger.finish(contract.contract_id.clone(), contract.start_date);
        debug!(
            account_id = %account.id,
            contract_id = %summary.contract_id,
            total_actual = %summary.total_actual,
            total_variance = %summary.total_variance,
            "Contract reconciled"
        );
        summary
    }

    async fn fetch_month(&self, account: &Account, month: Month) -> Option<Decimal> {
        let period = BillingPeriod::month(month);
        match self
            .gateway
            .fetch_cost(&account.credentials, period.start, period.end)
            .await
        {
            Ok(amount) => Some(amount),
            Err(e) => {
                warn!(
                    account_id = %account.id,
                    month = %month,
                    error = %e,
                    "Billing lookup failed, estimating from last actual"
                );
                None
            }
        }
    }
}
