//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `YUVAKART_DATA_DIR` - Directory for file-backed storage (default: .yuvakart)
//! - `YUVAKART_CART_KEY` - Storage key for the cart (default: yuvakart_cart)
//! - `YUVAKART_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (default: 500)
//! - `YUVAKART_SHIPPING_CHARGE` - Flat shipping charge (default: 50)
//! - `YUVAKART_UPI_ID` - Merchant UPI address (default: merchant@upi)
//! - `YUVAKART_MERCHANT_NAME` - Merchant name on payment links (default: YuvaKart)

use std::path::PathBuf;

use thiserror::Error;

use yuvakart_core::Price;

use crate::checkout::{ShippingPolicy, UpiSettings};
use crate::storage::{FileStorage, validate_key};
use crate::store::{CartStore, DEFAULT_CART_KEY};

const DEFAULT_DATA_DIR: &str = ".yuvakart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Root directory for `FileStorage`
    pub data_dir: PathBuf,
    /// Storage key the cart is kept under
    pub cart_key: String,
    /// Shipping charge rule
    pub shipping: ShippingPolicy,
    /// Merchant UPI details
    pub upi: UpiSettings,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            shipping: ShippingPolicy::default(),
            upi: UpiSettings::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("YUVAKART_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);

        let cart_key = lookup("YUVAKART_CART_KEY").unwrap_or(defaults.cart_key);
        validate_key(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("YUVAKART_CART_KEY".to_string(), e.to_string())
        })?;

        let shipping = ShippingPolicy {
            free_shipping_threshold: get_price(
                &lookup,
                "YUVAKART_FREE_SHIPPING_THRESHOLD",
                defaults.shipping.free_shipping_threshold,
            )?,
            flat_charge: get_price(
                &lookup,
                "YUVAKART_SHIPPING_CHARGE",
                defaults.shipping.flat_charge,
            )?,
        };

        let upi = UpiSettings {
            upi_id: get_non_empty(&lookup, "YUVAKART_UPI_ID", defaults.upi.upi_id)?,
            merchant_name: get_non_empty(
                &lookup,
                "YUVAKART_MERCHANT_NAME",
                defaults.upi.merchant_name,
            )?,
        };

        Ok(Self {
            data_dir,
            cart_key,
            shipping,
            upi,
        })
    }

    /// Open the cart store this configuration points at.
    #[must_use]
    pub fn open_store(&self) -> CartStore<FileStorage> {
        CartStore::with_key(FileStorage::new(&self.data_dir), &self.cart_key)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a price variable with a default value.
fn get_price(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Price,
) -> Result<Price, ConfigError> {
    lookup(key).map_or(Ok(default), |value| {
        value
            .parse::<Price>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Get a variable that must not be blank when set.
fn get_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: String,
) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        Some(value) => Ok(value.trim().to_string()),
        None => Ok(default),
    }
}
