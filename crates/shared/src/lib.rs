//! Shared types, errors, and configuration for Costrecon.
//!
//! This crate provides common types used across all other crates:
//! - Calendar month type used as the reconciliation ledger key
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::Month;
