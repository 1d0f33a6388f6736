//! Account listing routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use costrecon_core::account::{Account, Contract};
use costrecon_shared::AppError;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{AppState, error::error_response};

/// Placeholder shown when an account has no onboarding date.
const ONBOARD_DATE_NOT_SET: &str = "Not set in data";

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/{account_id}", get(get_account))
}

/// Account entry in listings.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub account_id: String,
    /// Account name.
    pub name: String,
    /// Onboarding date, or a placeholder when not recorded.
    pub onboard_date: String,
    /// Contracts of this account.
    pub contracts: Vec<ContractListing>,
}

/// Contract entry in account listings.
#[derive(Debug, Serialize)]
pub struct ContractListing {
    /// Contract ID.
    pub contract_id: String,
    /// Contract start date.
    pub start_date: NaiveDate,
    /// Monthly quoted cost.
    #[serde(with = "rust_decimal::serde::float")]
    pub quoted_cost: Decimal,
}

impl From<&Contract> for ContractListing {
    fn from(c: &Contract) -> Self {
        Self {
            contract_id: c.contract_id.clone(),
            start_date: c.start_date,
            quoted_cost: c.quoted_cost,
        }
    }
}

impl From<&Account> for AccountResponse {
    fn from(a: &Account) -> Self {
        Self {
            account_id: a.id.clone(),
            name: a.name.clone(),
            onboard_date: a
                .onboard_date
                .clone()
                .unwrap_or_else(|| ONBOARD_DATE_NOT_SET.to_string()),
            contracts: a.contracts.iter().map(ContractListing::from).collect(),
        }
    }
}

/// GET `/accounts` - List all accounts with their contracts.
async fn list_accounts(State(state): State<AppState>) -> impl IntoResponse {
    let accounts: Vec<AccountResponse> = state
        .catalog
        .accounts()
        .iter()
        .map(AccountResponse::from)
        .collect();

    (StatusCode::OK, Json(accounts))
}

/// GET `/accounts/{account_id}` - Get one account.
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> impl IntoResponse {
    match state.catalog.find_account(&account_id) {
        Some(account) => (StatusCode::OK, Json(AccountResponse::from(account))).into_response(),
        None => error_response(&AppError::NotFound("Account not found".to_string())),
    }
}
