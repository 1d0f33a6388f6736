//! Cached billing gateway.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::cache::CostCache;
use super::error::GatewayError;
use super::types::BillingPeriod;
use crate::account::AwsCredentials;

/// Remote cost-and-usage API.
///
/// Implementations query monthly granularity and the unblended cost metric
/// over `[period.start, period.end)` and return the single total amount.
#[async_trait]
pub trait CostSource: Send + Sync {
    /// Fetches the total unblended cost for the period.
    async fn cost_and_usage(
        &self,
        credentials: &AwsCredentials,
        period: &BillingPeriod,
    ) -> Result<Decimal, GatewayError>;
}

/// Billing gateway that memoizes remote lookups in a [`CostCache`].
#[derive(Clone)]
pub struct BillingGateway {
    source: Arc<dyn CostSource>,
    cache: Arc<CostCache>,
}

impl BillingGateway {
    /// Creates a gateway over `source`, caching results in `cache`.
    #[must_use]
    pub fn new(source: Arc<dyn CostSource>, cache: Arc<CostCache>) -> Self {
        Self { source, cache }
    }

    /// The cache shared by this gateway.
    #[must_use]
    pub fn cache(&self) -> &Arc<CostCache> {
        &self.cache
    }

    /// Returns the cost for `[start, end)`, served from cache when possible.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` when the remote call fails or its response
    /// lacks a total amount. Failures are never cached.
    pub async fn fetch_cost(
        &self,
        credentials: &AwsCredentials,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal, GatewayError> {
        let period = BillingPeriod::new(start, end);
        let key = period.cache_key();

        if let Some(amount) = self.cache.get(&key) {
            debug!(%key, %amount, "Cost cache hit");
            return Ok(amount);
        }

        let amount = self.source.cost_and_usage(credentials, &period).await?;
        debug!(%key, %amount, "Fetched cost from billing API");
        self.cache.set(key, amount);

        Ok(amount)
    }
}
