//! Billing gateway error types.

use thiserror::Error;

/// Errors returned by the billing API or while interpreting its response.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request could not be sent or timed out.
    #[error("billing API request failed: {0}")]
    Transport(String),

    /// The billing API answered with an error status.
    #[error("billing API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the API.
        message: String,
    },

    /// The response did not contain a single total amount for the period.
    #[error("malformed billing API response: {0}")]
    MalformedResponse(String),

    /// The request could not be signed.
    #[error("failed to sign billing API request: {0}")]
    Signing(String),
}

impl GatewayError {
    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an API error.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a malformed response error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}
