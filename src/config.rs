//! Configuration management for raubair.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::booking::SEAT_COUNT;
use crate::error::{Error, Result};
use crate::pricing::{builtin_coupons, CouponBook};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "raubair";

/// Default reservations file name.
const DATA_FILE_NAME: &str = "reservations.txt";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables, prefixed with `RAUBAIR_` and with a double
///    underscore between section and key (section and key names contain
///    single underscores themselves): `RAUBAIR_BOOKING__MAX_PARTY_SIZE`,
///    `RAUBAIR_STORAGE__DATA_PATH`
/// 2. TOML config file at `~/.config/raubair/config.toml`
/// 3. Default values
///
/// Coupon codes are uppercase and matched case-sensitively, while
/// environment variable keys are folded to lowercase, so the coupon table
/// can only be replaced through the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Booking configuration.
    pub booking: BookingConfig,
    /// Pricing configuration.
    pub pricing: PricingConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the reservations data file.
    /// Defaults to `~/.local/share/raubair/reservations.txt`
    pub data_path: Option<PathBuf>,
}

/// Booking-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Maximum tickets per manual reservation.
    pub max_party_size: usize,
}

/// Pricing-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Honoured coupon codes mapped to fractional discounts in `(0, 1)`.
    pub coupons: BTreeMap<String, f64>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { max_party_size: 4 }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            coupons: builtin_coupons(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `RAUBAIR_`, double underscore
    ///    between section and key, e.g. `RAUBAIR_BOOKING__MAX_PARTY_SIZE`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("RAUBAIR_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let max = usize::from(SEAT_COUNT);
        if self.booking.max_party_size == 0 || self.booking.max_party_size > max {
            return Err(Error::ConfigValidation {
                message: format!(
                    "max_party_size ({}) must be between 1 and {max}",
                    self.booking.max_party_size
                ),
            });
        }

        for (code, rate) in &self.pricing.coupons {
            if code.is_empty() || code.contains(',') || code.contains(char::is_whitespace) {
                return Err(Error::ConfigValidation {
                    message: format!("invalid coupon code: {code:?}"),
                });
            }
            if !(*rate > 0.0 && *rate < 1.0) {
                return Err(Error::ConfigValidation {
                    message: format!("coupon {code} rate ({rate}) must be between 0 and 1"),
                });
            }
        }

        Ok(())
    }

    /// Get the data file path, resolving defaults if not set.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }

    /// Build the coupon book from the configured rates.
    #[must_use]
    pub fn coupon_book(&self) -> CouponBook {
        CouponBook::from_rates(self.pricing.coupons.clone())
    }
}
