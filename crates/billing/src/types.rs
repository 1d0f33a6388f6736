//! Cost Explorer wire types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Operation target header value for `GetCostAndUsage`.
pub(crate) const GET_COST_AND_USAGE_TARGET: &str = "AWSInsightsIndexService.GetCostAndUsage";

/// Metric requested from Cost Explorer.
pub(crate) const UNBLENDED_COST: &str = "UnblendedCost";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetCostAndUsageRequest<'a> {
    pub time_period: DateInterval,
    pub granularity: &'a str,
    pub metrics: [&'a str; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DateInterval {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetCostAndUsageResponse {
    #[serde(default)]
    pub results_by_time: Vec<ResultByTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ResultByTime {
    #[serde(default)]
    pub total: HashMap<String, MetricValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MetricValue {
    pub amount: String,
}

/// Error body of the AWS JSON protocol.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(rename = "__type")]
    pub error_type: Option<String>,
    #[serde(alias = "Message")]
    pub message: Option<String>,
}

impl ApiErrorResponse {
    /// `Type: message`, with the namespace prefix stripped from the type.
    pub fn describe(&self) -> String {
        let kind = self
            .error_type
            .as_deref()
            .map(|t| t.rsplit('#').next().unwrap_or(t));
        match (kind, self.message.as_deref()) {
            (Some(kind), Some(msg)) => format!("{kind}: {msg}"),
            (Some(kind), None) => kind.to_string(),
            (None, Some(msg)) => msg.to_string(),
            (None, None) => "unknown error".to_string(),
        }
    }
}
