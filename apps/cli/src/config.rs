//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                           | Default  | Meaning                          |
//! |------------------------------------|----------|----------------------------------|
//! | `PAWCART_TAX_RATE`                 | `0.05`   | Tax as a fraction                |
//! | `PAWCART_SHIPPING_RATE`            | `2.000`  | Flat shipping fee                |
//! | `PAWCART_FREE_SHIPPING_THRESHOLD`  | `25.000` | Free shipping from; `none` = off |
//! | `PAWCART_GUIDE_POUCH_GRAMS`        | `120`    | Pouch size for the feeding guide |
//! | `PAWCART_SUBSCRIPTION_POUCH_GRAMS` | `150`    | Pouch size for subscriptions     |

use std::env;
use std::str::FromStr;

use pawcart_core::settings::{
    FeedingSettings, PricingSettings, DEFAULT_GUIDE_POUCH_GRAMS, DEFAULT_SUBSCRIPTION_POUCH_GRAMS,
};
use pawcart_core::{Money, TaxRate};
use rust_decimal::Decimal;
use serde::Serialize;

/// CLI configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CliConfig {
    pub pricing: PricingSettings,
    pub feeding: FeedingSettings,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tax_rate: Decimal = parse_or(&lookup, "PAWCART_TAX_RATE", "0.05")?;
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidValue("PAWCART_TAX_RATE".to_string()));
        }

        let shipping_rate: Decimal = parse_or(&lookup, "PAWCART_SHIPPING_RATE", "2.000")?;
        if shipping_rate < Decimal::ZERO {
            return Err(ConfigError::InvalidValue("PAWCART_SHIPPING_RATE".to_string()));
        }

        let free_shipping_threshold = match lookup("PAWCART_FREE_SHIPPING_THRESHOLD") {
            Some(raw) if raw.trim().is_empty() || raw.trim().eq_ignore_ascii_case("none") => None,
            Some(raw) => Some(Money::from_decimal(raw.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("PAWCART_FREE_SHIPPING_THRESHOLD".to_string())
            })?)),
            None => Some(Money::from_fils(25_000)),
        };

        let guide_pouch_grams = pouch_grams(
            &lookup,
            "PAWCART_GUIDE_POUCH_GRAMS",
            DEFAULT_GUIDE_POUCH_GRAMS,
        )?;
        let subscription_pouch_grams = pouch_grams(
            &lookup,
            "PAWCART_SUBSCRIPTION_POUCH_GRAMS",
            DEFAULT_SUBSCRIPTION_POUCH_GRAMS,
        )?;

        Ok(CliConfig {
            pricing: PricingSettings {
                tax_rate: TaxRate::from_fraction(tax_rate),
                shipping_rate: Money::from_decimal(shipping_rate),
                free_shipping_threshold,
            },
            feeding: FeedingSettings {
                guide_pouch_grams,
                subscription_pouch_grams,
                ..FeedingSettings::default()
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

fn pouch_grams<F>(lookup: &F, key: &str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let grams: f64 = parse_or(lookup, key, &default.to_string())?;
    if !grams.is_finite() || grams <= 0.0 {
        return Err(ConfigError::InvalidValue(key.to_string()));
    }
    Ok(grams)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
