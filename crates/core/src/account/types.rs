//! Account and contract data types.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use costrecon_shared::Month;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Credentials used to query the billing API on behalf of an account.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AwsCredentials {
    /// Access key ID.
    #[serde(rename = "access_key")]
    pub access_key_id: String,
    /// Secret access key.
    #[serde(rename = "secret_key")]
    pub secret_access_key: String,
}

impl AwsCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

/// A contract with a fixed monthly quoted cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Contract identifier, unique within its account.
    pub contract_id: String,
    /// Contract start date. Reconciliation starts at the month containing it.
    pub start_date: NaiveDate,
    /// Fixed monthly quoted amount.
    pub quoted_cost: Decimal,
    /// Manual actual amounts for months billed before live tracking.
    #[serde(default)]
    pub historical_costs: BTreeMap<Month, Decimal>,
}

impl Contract {
    /// Month containing the contract start date.
    #[must_use]
    pub fn start_month(&self) -> Month {
        Month::containing(self.start_date)
    }

    /// Historical override for `month`, if one was supplied.
    #[must_use]
    pub fn historical_cost(&self, month: Month) -> Option<Decimal> {
        self.historical_costs.get(&month).copied()
    }
}

/// A cloud account and the contracts reconciled against it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Account identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form onboarding date, when recorded.
    #[serde(default)]
    pub onboard_date: Option<String>,
    /// Billing API credentials.
    #[serde(flatten)]
    pub credentials: AwsCredentials,
    /// Contracts belonging to this account.
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

impl Account {
    /// Looks up a contract by ID.
    #[must_use]
    pub fn contract(&self, contract_id: &str) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.contract_id == contract_id)
    }
}
