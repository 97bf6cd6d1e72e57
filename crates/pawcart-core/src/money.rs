//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Fils?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In the storefront JavaScript:                                          │
//! │    1.333 * 3 = 3.9989999999999997  ❌ WRONG!                            │
//! │                                                                         │
//! │  The store prices in a 3-decimal currency (1 unit = 1000 fils), so      │
//! │  every amount must land on an exact thousandth.                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Fils                                             │
//! │    Money stores i64 thousandths. Anything that can produce a finer      │
//! │    fraction (rates, percentages, fractional quantities) is computed     │
//! │    in exact decimal and rounded half-up back to a whole fils.           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pawcart_core::money::Money;
//!
//! // Create from fils (preferred)
//! let price = Money::from_fils(1_500); // 1.500
//!
//! // Arithmetic operations
//! let doubled = price.multiply_quantity(2);      // 3.000
//! let total = price + Money::from_fils(2_000);   // 3.500
//! assert_eq!(total.to_string(), "3.500");
//! assert_eq!(doubled.fils(), 3_000);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

use crate::types::TaxRate;

/// Number of fractional digits carried by every order amount.
pub const MONEY_SCALE: u32 = 3;

/// Fils per currency unit (10^MONEY_SCALE).
pub const FILS_PER_UNIT: i64 = 1_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in fils (thousandths of the currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Intermediate values (e.g. `amount - discount`) may go
///   negative before they are clamped
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Wire format**: a decimal string with exactly three fractional digits
///   (`"7.250"`); numbers and strings are both accepted on input
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► product_total / subtotal
///                                │
///                                ▼
///              apply_discount ──► tax ──► shipping ──► order_total
///
/// SubscriptionQuote.price (rounded to 2 places for display)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from fils (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use pawcart_core::money::Money;
    ///
    /// let price = Money::from_fils(1_333); // Represents 1.333
    /// assert_eq!(price.fils(), 1_333);
    /// ```
    #[inline]
    pub const fn from_fils(fils: i64) -> Self {
        Money(fils)
    }

    /// Creates Money from an exact decimal, rounding half-up (away from zero)
    /// to three places.
    ///
    /// Values outside the `i64` fils range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use pawcart_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::from_decimal(Decimal::new(39_995, 4)); // 3.9995
    /// assert_eq!(m.to_string(), "4.000");
    /// ```
    pub fn from_decimal(value: Decimal) -> Self {
        let rounded =
            value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        match rounded
            .checked_mul(Decimal::from(FILS_PER_UNIT))
            .and_then(|fils| fils.to_i64())
        {
            Some(fils) => Money(fils),
            None if rounded.is_sign_negative() => Money(i64::MIN),
            None => Money(i64::MAX),
        }
    }

    /// Returns the exact decimal value (scale 3).
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MONEY_SCALE)
    }

    /// Returns the value in fils.
    #[inline]
    pub const fn fils(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / FILS_PER_UNIT
    }

    /// Returns the fils portion (always 0-999).
    #[inline]
    pub const fn fils_part(&self) -> i64 {
        (self.0 % FILS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative values to zero.
    ///
    /// This is the single named policy for "never return a negative amount":
    /// discounts larger than the amount and totals that would go below zero
    /// both come through here.
    #[inline]
    pub const fn coerce_non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Multiplies by an exact decimal factor and rounds back to three places.
    pub fn times(&self, factor: Decimal) -> Money {
        Money::from_decimal(self.to_decimal().saturating_mul(factor))
    }

    /// Re-rounds to fewer fractional digits (half-up).
    ///
    /// Subscription display prices use two places while order amounts keep
    /// three, so quotes pass through `round_dp(2)`.
    ///
    /// ## Example
    /// ```rust
    /// use pawcart_core::money::Money;
    ///
    /// assert_eq!(Money::from_fils(12_345).round_dp(2).to_string(), "12.350");
    /// assert_eq!(Money::from_fils(12_344).round_dp(2).to_string(), "12.340");
    /// ```
    pub fn round_dp(&self, dp: u32) -> Money {
        Money::from_decimal(
            self.to_decimal()
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Calculates tax as `round3(amount * rate)`.
    ///
    /// ## Example
    /// ```rust
    /// use pawcart_core::money::Money;
    /// use pawcart_core::types::TaxRate;
    ///
    /// let amount = Money::from_fils(10_000); // 10.000
    /// let rate = TaxRate::from_bps(500);     // 5%
    ///
    /// assert_eq!(amount.calculate_tax(rate).to_string(), "0.500");
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.times(rate.fraction())
    }

    /// Multiplies money by an integer quantity.
    ///
    /// ## Example
    /// ```rust
    /// use pawcart_core::money::Money;
    ///
    /// let unit_price = Money::from_fils(1_333);
    /// assert_eq!(unit_price.multiply_quantity(3).fils(), 3_999);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Applies a percentage discount (0-100) and returns the discounted amount.
    ///
    /// ## Example
    /// ```rust
    /// use pawcart_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::from_fils(10_000);
    /// let discounted = subtotal.apply_percentage_discount(Decimal::from(10));
    /// assert_eq!(discounted.fils(), 9_000);
    /// ```
    pub fn apply_percentage_discount(&self, percent: Decimal) -> Money {
        let off = self.to_decimal().saturating_mul(percent) / Decimal::ONE_HUNDRED;
        Money::from_decimal(self.to_decimal().saturating_sub(off))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the canonical three-decimal form, without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:03}", sign, self.units().abs(), self.fils_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts `7.25`, `"7.25"` or `"7.250"`; anything finer than a fils is
/// rounded half-up.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Money::from_decimal)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
