//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for accounts and contract reconciliation
//! - CSV export of contract reports
//! - Error responses

pub mod error;
pub mod export;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use costrecon_core::account::AccountCatalog;
use costrecon_core::reconciliation::ReconciliationEngine;
use costrecon_shared::config::CorsConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Static account catalog.
    pub catalog: Arc<AccountCatalog>,
    /// Reconciliation engine (owns the billing gateway and cost cache).
    pub engine: Arc<ReconciliationEngine>,
}

/// Creates the main application router.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors.allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod test_support;
