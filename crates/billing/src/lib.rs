//! AWS Cost Explorer client.
//!
//! Implements [`costrecon_core::billing::CostSource`] by calling the
//! `GetCostAndUsage` operation over the AWS JSON 1.1 protocol, signing each
//! request with Signature Version 4.

pub mod client;
pub mod sigv4;
mod types;

pub use client::CostExplorerClient;
