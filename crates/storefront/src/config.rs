//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TOTE_DATA_DIR` - Directory holding the persisted cart (default: `.tote`)
//! - `TOTE_CATALOG` - Catalog payload file used by the CLI
//! - `TOTE_TAX_RATE` - Tax as a fraction of the subtotal (default: 0.10)
//! - `TOTE_FREE_SHIPPING_THRESHOLD` - Subtotals above this ship free (default: 50)
//! - `TOTE_SHIPPING_FEE` - Flat shipping charge below the threshold (default: 10)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::checkout::PricingRules;

const DEFAULT_DATA_DIR: &str = ".tote";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file-backed key-value store
    pub data_dir: PathBuf,
    /// Default catalog payload file
    pub catalog_path: Option<PathBuf>,
    /// Tax and shipping rules
    pub pricing: PricingRules,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            pricing: PricingRules::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = PricingRules::default();

        let data_dir = lookup("TOTE_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let catalog_path = lookup("TOTE_CATALOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let pricing = PricingRules {
            tax_rate: parse_non_negative(&lookup, "TOTE_TAX_RATE", defaults.tax_rate)?,
            free_shipping_threshold: parse_non_negative(
                &lookup,
                "TOTE_FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            )?,
            shipping_fee: parse_non_negative(
                &lookup,
                "TOTE_SHIPPING_FEE",
                defaults.shipping_fee,
            )?,
        };

        Ok(Self {
            data_dir,
            catalog_path,
            pricing,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional non-negative decimal, falling back to `default`.
fn parse_non_negative(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Decimal,
) -> Result<Decimal, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(value)
}
