//! Subcommand implementations.
//!
//! Each command prints its result to stdout; logs go to stderr.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use thiserror::Error;
use tote_storefront::StorefrontError;
use tote_storefront::cart::SnapshotError;
use tote_storefront::catalog::CatalogError;
use tote_storefront::checkout::CheckoutError;
use tote_storefront::config::ConfigError;

pub mod cart;
pub mod checkout;
pub mod products;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No catalog file was given.
    #[error("No catalog given: pass --catalog or set TOTE_CATALOG")]
    MissingCatalog,

    /// Storefront operation failed.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// Output could not be encoded.
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for CommandError {
    fn from(e: ConfigError) -> Self {
        Self::Storefront(e.into())
    }
}

impl From<CatalogError> for CommandError {
    fn from(e: CatalogError) -> Self {
        Self::Storefront(e.into())
    }
}

impl From<CheckoutError> for CommandError {
    fn from(e: CheckoutError) -> Self {
        Self::Storefront(e.into())
    }
}

impl From<SnapshotError> for CommandError {
    fn from(e: SnapshotError) -> Self {
        Self::Storefront(e.into())
    }
}

/// Pick the catalog file from the flag, falling back to configuration.
pub fn catalog_path(
    flag: Option<PathBuf>,
    config: &tote_storefront::StorefrontConfig,
) -> Result<PathBuf, CommandError> {
    flag.or_else(|| config.catalog_path.clone())
        .ok_or(CommandError::MissingCatalog)
}
