//! Unified error type for storefront operations.
//!
//! Each module has its own error enum; `StorefrontError` wraps them so that
//! callers driving several modules can use a single `?`.

use thiserror::Error;

use crate::cart::SnapshotError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog payload could not be read.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Order was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Cart snapshot could not be read or written.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Key-value store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Requested product does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for storefront operations.
pub type Result<T, E = StorefrontError> = std::result::Result<T, E>;
