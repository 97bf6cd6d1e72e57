//! # pawcart-core: Pure Pricing & Feeding Logic for Pawcart
//!
//! This crate holds the only real arithmetic of the Pawcart pet-food store:
//! order pricing and the feeding/subscription calculator. Everything is a
//! pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pawcart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (server pages + JS)                  │   │
//! │  │   Catalog ──► Cart ──► Checkout        Questionnaire ──► Plans  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Request handlers (checkout, questionnaire)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ pawcart-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  money   │  │ pricing  │  │ feeding  │  │ subscription │   │   │
//! │  │   │  Money   │  │ totals   │  │  grams   │  │    quotes    │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type in integer fils (3 decimals)
//! - [`types`] - Input types (line items, coupons, pet profile)
//! - [`pricing`] - Order pricing engine
//! - [`feeding`] - Daily grams, ideal weight, weight status
//! - [`subscription`] - Plan quotes and the questionnaire result
//! - [`settings`] - Rates, thresholds, pouch sizes
//! - [`validation`] - Strict boundary checks
//! - [`error`] - Domain error types
//!
//! ## Two Paths
//!
//! 1. **Total functions** (`pricing::*`, `feeding::*`, `subscription_quotes`):
//!    never fail; bad numbers degrade to zero.
//! 2. **Strict functions** (`pricing::recompute_order`,
//!    `pricing::verify_client_total`, `subscription::feeding_guide`):
//!    validate first and return `CoreResult`.
//!
//! ## Example Usage
//!
//! ```rust
//! use pawcart_core::money::Money;
//! use pawcart_core::pricing::recalculate_cart_totals;
//! use pawcart_core::types::{LineItem, TaxRate};
//!
//! let items = [
//!     LineItem::new(Money::from_fils(1_500), 2),
//!     LineItem::new(Money::from_fils(2_000), 1),
//! ];
//! let totals = recalculate_cart_totals(&items, None, TaxRate::from_bps(500), Money::from_fils(2_000));
//!
//! assert_eq!(totals.total.to_string(), "7.250");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod feeding;
pub mod money;
pub mod pricing;
pub mod settings;
pub mod subscription;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::CartTotals;
pub use settings::{FeedingSettings, PricingSettings};
pub use subscription::{FeedingGuide, SubscriptionQuote};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single checkout.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Catches typos like 1000 instead of 10 on the strict path.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Heaviest weight the questionnaire accepts, in kg.
pub const MAX_PET_WEIGHT_KG: f64 = 120.0;
