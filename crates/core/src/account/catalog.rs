//! Static account catalog.
//!
//! Accounts are configured in a JSON array. Entries that fail to parse are
//! skipped with a warning so one bad record never hides the others.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use super::error::CatalogError;
use super::types::{Account, Contract};

/// In-memory catalog of accounts and their contracts.
#[derive(Debug, Clone, Default)]
pub struct AccountCatalog {
    accounts: Vec<Account>,
}

impl AccountCatalog {
    /// Creates a catalog from already-parsed accounts.
    #[must_use]
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Loads the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read and
    /// `CatalogError::InvalidFormat` if it is not a JSON array.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            accounts = catalog.accounts.len(),
            "Account catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses the catalog from a JSON string, skipping malformed entries.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidFormat` if the document is not a JSON array.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<Value> =
            serde_json::from_str(raw).map_err(|e| CatalogError::InvalidFormat(e.to_string()))?;

        let accounts = entries
            .into_iter()
            .filter_map(|entry| {
                let id = entry
                    .get("id")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string();
                match serde_json::from_value::<Account>(entry) {
                    Ok(account) => Some(account),
                    Err(e) => {
                        warn!(account_id = %id, error = %e, "Skipping malformed account entry");
                        None
                    }
                }
            })
            .collect();

        Ok(Self { accounts })
    }

    /// All accounts, in catalog order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Looks up an account by ID.
    #[must_use]
    pub fn find_account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == account_id)
    }

    /// Looks up a contract within an account.
    #[must_use]
    pub fn find_contract(&self, account_id: &str, contract_id: &str) -> Option<(&Account, &Contract)> {
        let account = self.find_account(account_id)?;
        account.contract(contract_id).map(|c| (account, c))
    }
}
