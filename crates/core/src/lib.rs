//! Core business logic for Costrecon.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! The remote billing API is reached through the [`billing::CostSource`]
//! trait, implemented by the `costrecon-billing` crate.
//!
//! # Modules
//!
//! - `account` - Accounts, contracts, and the static account catalog
//! - `billing` - Cost cache and billing gateway
//! - `reconciliation` - 12-month actual vs quoted ledger
//! - `report` - Display and export rows

pub mod account;
pub mod billing;
pub mod reconciliation;
pub mod report;
