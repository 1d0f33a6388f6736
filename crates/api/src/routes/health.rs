//! Liveness endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness report.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Accounts loaded from the catalog.
    pub accounts: usize,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        accounts: state.catalog.accounts().len(),
    })
}

/// Creates the `/health` route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
