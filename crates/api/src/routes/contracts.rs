//! Contract reconciliation and export routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use costrecon_core::account::{Account, Contract};
use costrecon_core::report::ReportAssembler;
use costrecon_shared::{AppError, AppResult};
use tracing::info;

use crate::export::{CSV_CONTENT_TYPE, EXPORT_FILENAME, rows_to_csv};
use crate::{AppState, error::error_response};

/// Creates the contract routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/{account_id}/contracts/{contract_id}",
            get(get_contract_summary),
        )
        .route(
            "/accounts/{account_id}/contracts/{contract_id}/export",
            get(export_contract_summary),
        )
}

/// Resolves the account and contract named in the path.
fn lookup<'a>(
    state: &'a AppState,
    account_id: &str,
    contract_id: &str,
) -> AppResult<(&'a Account, &'a Contract)> {
    let account = state
        .catalog
        .find_account(account_id)
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;
    let contract = account
        .contract(contract_id)
        .ok_or_else(|| AppError::NotFound("Contract not found".to_string()))?;
    Ok((account, contract))
}

/// GET `/accounts/{account_id}/contracts/{contract_id}` - 12-month reconciliation.
async fn get_contract_summary(
    State(state): State<AppState>,
    Path((account_id, contract_id)): Path<(String, String)>,
) -> Response {
    let (account, contract) = match lookup(&state, &account_id, &contract_id) {
        Ok(found) => found,
        Err(e) => return error_response(&e),
    };

    let summary = state.engine.reconcile(account, contract).await;
    (StatusCode::OK, Json(summary)).into_response()
}

/// GET `/accounts/{account_id}/contracts/{contract_id}/export` - CSV download.
async fn export_contract_summary(
    State(state): State<AppState>,
    Path((account_id, contract_id)): Path<(String, String)>,
) -> Response {
    let (account, contract) = match lookup(&state, &account_id, &contract_id) {
        Ok(found) => found,
        Err(e) => return error_response(&e),
    };

    let summary = state.engine.reconcile(account, contract).await;
    let rows = ReportAssembler::to_rows(&summary);

    match rows_to_csv(&rows) {
        Ok(bytes) => {
            info!(%account_id, %contract_id, rows = rows.len(), "Contract report exported");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename={EXPORT_FILENAME}"),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => error_response(&AppError::Internal(e.to_string())),
    }
}
