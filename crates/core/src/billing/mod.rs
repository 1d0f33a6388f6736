//! Billing API access.
//!
//! The [`BillingGateway`] answers "what did this account spend between two
//! dates" by consulting the [`CostCache`] first and falling back to a
//! [`CostSource`] (the remote cost-and-usage API).

pub mod cache;
pub mod error;
pub mod gateway;
pub mod types;

pub use cache::{CostCache, DEFAULT_TTL};
pub use error::GatewayError;
pub use gateway::{BillingGateway, CostSource};
pub use types::BillingPeriod;
