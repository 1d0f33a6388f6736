//! Shared fixtures for router tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use costrecon_core::account::{AccountCatalog, AwsCredentials};
use costrecon_core::billing::{BillingGateway, BillingPeriod, CostCache, CostSource, GatewayError};
use costrecon_core::reconciliation::ReconciliationEngine;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::AppState;

const CATALOG: &str = r#"[
    {
        "id": "acc-1",
        "name": "Production",
        "onboard_date": "2023-11-01",
        "access_key": "AKID1",
        "secret_key": "secret1",
        "contracts": [
            {
                "contract_id": "c-1",
                "start_date": "2024-01-01",
                "quoted_cost": 500,
                "historical_costs": {"2024-01": 450}
            }
        ]
    },
    {
        "id": "acc-2",
        "name": "Staging",
        "access_key": "AKID2",
        "secret_key": "secret2"
    }
]"#;

/// Bills every month at 510.
struct FlatRateSource;

#[async_trait]
impl CostSource for FlatRateSource {
    async fn cost_and_usage(
        &self,
        _credentials: &AwsCredentials,
        _period: &BillingPeriod,
    ) -> Result<Decimal, GatewayError> {
        Ok(dec!(510))
    }
}

pub(crate) fn test_state() -> AppState {
    let gateway = BillingGateway::new(Arc::new(FlatRateSource), Arc::new(CostCache::new()));
    AppState {
        catalog: Arc::new(AccountCatalog::from_json_str(CATALOG).unwrap()),
        engine: Arc::new(ReconciliationEngine::new(gateway)),
    }
}

pub(crate) async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
