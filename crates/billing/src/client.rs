//! HTTP client for the Cost Explorer `GetCostAndUsage` API.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use costrecon_core::account::AwsCredentials;
use costrecon_core::billing::{BillingPeriod, CostSource, GatewayError};
use costrecon_shared::config::BillingConfig;
use reqwest::Url;
use rust_decimal::Decimal;
use tracing::debug;

use crate::sigv4::{self, SigningParams, SigningRequest};
use crate::types::{
    ApiErrorResponse, DateInterval, GET_COST_AND_USAGE_TARGET, GetCostAndUsageRequest,
    GetCostAndUsageResponse, UNBLENDED_COST,
};

/// Service name used in the SigV4 credential scope.
const SERVICE: &str = "ce";

/// Content type of the AWS JSON 1.1 protocol.
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Cost Explorer client.
///
/// Credentials are supplied per call, so one client serves every account.
#[derive(Debug, Clone)]
pub struct CostExplorerClient {
    client: reqwest::Client,
    endpoint: Url,
    host: String,
    region: String,
}

impl CostExplorerClient {
    /// Creates a client from billing configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the endpoint is not a valid URL
    /// or the HTTP client cannot be built.
    pub fn new(config: &BillingConfig) -> Result<Self, GatewayError> {
        let endpoint = Url::parse(&config.endpoint_url())
            .map_err(|e| GatewayError::transport(format!("invalid billing endpoint: {e}")))?;
        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(GatewayError::transport(format!(
                    "billing endpoint has no host: {endpoint}"
                )));
            }
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            host,
            region: config.region.clone(),
        })
    }

    fn encode_request(period: &BillingPeriod) -> Result<Vec<u8>, GatewayError> {
        serde_json::to_vec(&GetCostAndUsageRequest {
            time_period: DateInterval {
                start: period.start.to_string(),
                end: period.end.to_string(),
            },
            granularity: "MONTHLY",
            metrics: [UNBLENDED_COST],
        })
        .map_err(|e| GatewayError::malformed(format!("failed to encode request: {e}")))
    }

    fn parse_amount(body: &str) -> Result<Decimal, GatewayError> {
        let response: GetCostAndUsageResponse = serde_json::from_str(body)
            .map_err(|e| GatewayError::malformed(format!("invalid JSON: {e}")))?;

        let result = response
            .results_by_time
            .first()
            .ok_or_else(|| GatewayError::malformed("ResultsByTime is empty"))?;
        let metric = result
            .total
            .get(UNBLENDED_COST)
            .ok_or_else(|| GatewayError::malformed("Total.UnblendedCost is missing"))?;

        Decimal::from_str(metric.amount.trim())
            .or_else(|_| Decimal::from_scientific(metric.amount.trim()))
            .map_err(|e| {
                GatewayError::malformed(format!("invalid amount '{}': {e}", metric.amount))
            })
    }
}

#[async_trait]
impl CostSource for CostExplorerClient {
    async fn cost_and_usage(
        &self,
        credentials: &AwsCredentials,
        period: &BillingPeriod,
    ) -> Result<Decimal, GatewayError> {
        let body = Self::encode_request(period)?;

        let amz_date = sigv4::amz_date(Utc::now());
        let headers = [
            ("content-type", CONTENT_TYPE),
            ("host", self.host.as_str()),
            ("x-amz-date", amz_date.as_str()),
            ("x-amz-target", GET_COST_AND_USAGE_TARGET),
        ];
        let authorization = sigv4::authorization(
            &SigningRequest {
                method: "POST",
                path: self.endpoint.path(),
                query: "",
                headers: &headers,
                payload: &body,
            },
            &SigningParams {
                access_key_id: &credentials.access_key_id,
                secret_access_key: &credentials.secret_access_key,
                region: &self.region,
                service: SERVICE,
            },
            &amz_date,
        )
        .map_err(GatewayError::Signing)?;

        let mut request = self.client.post(self.endpoint.clone()).body(body);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request
            .header("authorization", authorization)
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(format!("failed to read response: {e}")))?;
        debug!(
            status = %status,
            start = %period.start,
            end = %period.end,
            "Cost Explorer response received"
        );

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map_or_else(|_| text.clone(), |err| err.describe());
            return Err(GatewayError::api(status.as_u16(), message));
        }

        Self::parse_amount(&text)
    }
}
