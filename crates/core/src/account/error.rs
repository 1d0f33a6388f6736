//! Catalog error types.

use thiserror::Error;

/// Errors raised while loading the account catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read account catalog {path}: {source}")]
    Io {
        /// Path of the catalog file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not a JSON array of accounts.
    #[error("account catalog is not a JSON array: {0}")]
    InvalidFormat(String),
}
