//! Costrecon API Server
//!
//! Main entry point for the cost reconciliation service.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use costrecon_api::{AppState, create_router};
use costrecon_billing::CostExplorerClient;
use costrecon_core::account::AccountCatalog;
use costrecon_core::billing::{BillingGateway, CostCache};
use costrecon_core::reconciliation::ReconciliationEngine;
use costrecon_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "costrecon=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Load account catalog
    let catalog = AccountCatalog::load(&config.catalog.path)?;

    // Billing gateway with a process-wide cost cache
    let cache = Arc::new(CostCache::with_ttl(Duration::from_secs(
        config.cache.ttl_minutes.saturating_mul(60),
    )));
    let client = CostExplorerClient::new(&config.billing)?;
    info!(
        endpoint = %config.billing.endpoint_url(),
        region = %config.billing.region,
        cache_ttl_minutes = config.cache.ttl_minutes,
        "Billing gateway configured"
    );
    let gateway = BillingGateway::new(Arc::new(client), Arc::clone(&cache));

    spawn_cache_sweeper(cache, Duration::from_secs(config.cache.sweep_interval_secs));

    // Create application state
    let state = AppState {
        catalog: Arc::new(catalog),
        engine: Arc::new(ReconciliationEngine::new(gateway)),
    };

    // Create router
    let app = create_router(state, &config.cors);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops expired cost cache entries.
fn spawn_cache_sweeper(cache: Arc<CostCache>, every: Duration) {
    if every.is_zero() {
        return;
    }

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let purged = cache.purge_expired();
            if purged > 0 {
                debug!(purged, remaining = cache.len(), "Swept expired cost cache entries");
            }
        }
    });
}
