//! # Settings
//!
//! Tunable inputs to the calculators.
//!
//! The request handler owns where these come from (environment, config file,
//! admin panel); the core only defines their shape and defaults.
//!
//! ## Two Pouch Sizes
//! ```text
//! Feeding guide   ──► guide_pouch_grams        (120 g)
//! Subscriptions   ──► subscription_pouch_grams (150 g)
//! ```
//! The two screens use different pouch weights. Changing either one changes
//! customer-facing numbers.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{PlanType, Species, TaxRate};

/// Pouch weight used by the feeding guide.
pub const DEFAULT_GUIDE_POUCH_GRAMS: f64 = 120.0;

/// Pouch weight used by subscription quotes.
pub const DEFAULT_SUBSCRIPTION_POUCH_GRAMS: f64 = 150.0;

// =============================================================================
// Pricing Settings
// =============================================================================

/// Checkout-wide pricing inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Tax as a fraction of the discounted subtotal.
    pub tax_rate: TaxRate,

    /// Flat shipping fee.
    pub shipping_rate: Money,

    /// Orders at or above this discounted amount ship free.
    pub free_shipping_threshold: Option<Money>,
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate: TaxRate::from_bps(500),
            shipping_rate: Money::from_fils(2_000),
            free_shipping_threshold: Some(Money::from_fils(25_000)),
        }
    }
}

// =============================================================================
// Per-Pouch Rates
// =============================================================================

/// Per-pouch price for each plan, one table per species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRates {
    pub weekly: Money,
    pub monthly: Money,
    pub quarterly: Money,
}

impl PlanRates {
    pub fn rate(&self, plan: PlanType) -> Money {
        match plan {
            PlanType::Weekly => self.weekly,
            PlanType::Monthly => self.monthly,
            PlanType::Quarterly => self.quarterly,
        }
    }
}

/// Per-pouch rates keyed by species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PouchRates {
    pub dog: PlanRates,
    pub cat: PlanRates,
}

impl PouchRates {
    pub fn rate(&self, species: Species, plan: PlanType) -> Money {
        match species {
            Species::Dog => self.dog.rate(plan),
            Species::Cat => self.cat.rate(plan),
        }
    }
}

impl Default for PouchRates {
    fn default() -> Self {
        PouchRates {
            dog: PlanRates {
                weekly: Money::from_fils(950),
                monthly: Money::from_fils(900),
                quarterly: Money::from_fils(850),
            },
            cat: PlanRates {
                weekly: Money::from_fils(800),
                monthly: Money::from_fils(750),
                quarterly: Money::from_fils(700),
            },
        }
    }
}

// =============================================================================
// Feeding Settings
// =============================================================================

/// Inputs to the feeding guide and subscription quotes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedingSettings {
    pub guide_pouch_grams: f64,
    pub subscription_pouch_grams: f64,
    pub pouch_rates: PouchRates,
}

impl Default for FeedingSettings {
    fn default() -> Self {
        FeedingSettings {
            guide_pouch_grams: DEFAULT_GUIDE_POUCH_GRAMS,
            subscription_pouch_grams: DEFAULT_SUBSCRIPTION_POUCH_GRAMS,
            pouch_rates: PouchRates::default(),
        }
    }
}
