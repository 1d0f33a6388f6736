//! Accounts, contracts, and the static account catalog.

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::AccountCatalog;
pub use error::CatalogError;
pub use types::{Account, AwsCredentials, Contract};
