//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_DB_PATH` - sled database directory (default: cart.db)
//! - `CART_FREE_SHIPPING_THRESHOLD` - items price at which shipping is free (default: 10000)
//! - `CART_SHIPPING_SURCHARGE` - shipping charged below the threshold (default: 5000)
//! - `CART_TAX_RATE` - tax as a fraction of the items price (default: 0.18)

use super::error::ConfigError;
use super::pricing::{FREE_SHIPPING_THRESHOLD, SHIPPING_SURCHARGE, TAX_RATE};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_DB_PATH: &str = "cart.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    pub free_shipping_threshold: Decimal,
    pub shipping_surcharge: Decimal,
    pub tax_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub db_path: PathBuf,
    pub pricing: PricingConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            shipping_surcharge: SHIPPING_SURCHARGE,
            tax_rate: TAX_RATE,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("CART_DB_PATH")
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let pricing = PricingConfig {
            free_shipping_threshold: decimal_or_default(
                &lookup,
                "CART_FREE_SHIPPING_THRESHOLD",
                FREE_SHIPPING_THRESHOLD,
            )?,
            shipping_surcharge: decimal_or_default(
                &lookup,
                "CART_SHIPPING_SURCHARGE",
                SHIPPING_SURCHARGE,
            )?,
            tax_rate: decimal_or_default(&lookup, "CART_TAX_RATE", TAX_RATE)?,
        };

        Ok(Self {
            db_path: PathBuf::from(db_path),
            pricing,
        })
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            pricing: PricingConfig::default(),
        }
    }
}

/// Parse a non-negative decimal, falling back to `default` when unset.
fn decimal_or_default<F>(lookup: &F, key: &str, default: Decimal) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let value = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if value.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }

    Ok(value)
}
