//! # Domain Types
//!
//! Input types shared by the pricing engine and the feeding calculator.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Order side                          Pet side                           │
//! │  ┌─────────────────┐                 ┌─────────────────┐               │
//! │  │    LineItem     │                 │   PetProfile    │               │
//! │  │  unit_price     │                 │  species        │               │
//! │  │  quantity       │                 │  weight_kg      │               │
//! │  └─────────────────┘                 │  age_group      │               │
//! │  ┌─────────────────┐                 │  activity_level │               │
//! │  │    Discount     │                 │  goal           │               │
//! │  │  type: pct|fixed│                 └─────────────────┘               │
//! │  │  value          │                                                    │
//! │  └─────────────────┘                 Species / AgeGroup /               │
//! │  ┌─────────────────┐                 ActivityLevel / Goal / PlanType    │
//! │  │    TaxRate      │                                                    │
//! │  │  0.05 = 5%      │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every input type here is plain data: constructed by the request handler,
//! borrowed by the calculators, never mutated by them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a fraction of the taxed amount.
///
/// `0.05` means 5%. The checkout handler passes rates in this form, not as a
/// percentage integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from a fraction (`0.05` = 5%).
    #[inline]
    pub const fn from_fraction(fraction: Decimal) -> Self {
        TaxRate(fraction)
    }

    /// Creates a tax rate from basis points (500 = 5%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 4))
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Discount
// =============================================================================

/// How a coupon's `value` is interpreted.
///
/// Unknown `type` strings do not fail deserialization; they land in
/// `Unsupported` so the permissive pricing path can treat them as a no-op
/// and the strict path can reject them by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscountKind {
    /// `value` is a percentage of the amount, 0-100.
    Percentage,
    /// `value` is a money amount subtracted from the total.
    Fixed,
    /// Any other coupon type, kept verbatim.
    Unsupported(String),
}

impl From<String> for DiscountKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "percentage" => DiscountKind::Percentage,
            "fixed" => DiscountKind::Fixed,
            _ => DiscountKind::Unsupported(s),
        }
    }
}

impl From<DiscountKind> for String {
    fn from(kind: DiscountKind) -> Self {
        match kind {
            DiscountKind::Percentage => "percentage".to_string(),
            DiscountKind::Fixed => "fixed".to_string(),
            DiscountKind::Unsupported(s) => s,
        }
    }
}

/// A coupon applied to an order amount.
///
/// ## Wire Shape
/// ```json
/// { "type": "percentage", "value": 10 }
/// { "type": "fixed", "value": "2.000" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    #[serde(rename = "type")]
    #[ts(type = "\"percentage\" | \"fixed\" | string")]
    pub kind: DiscountKind,

    /// Percentage (0-100) or money amount depending on `kind`.
    #[ts(type = "number | string")]
    pub value: Decimal,
}

impl Discount {
    /// A percentage coupon (`10` = 10% off).
    pub fn percentage(value: Decimal) -> Self {
        Discount {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    /// A fixed-amount coupon.
    pub fn fixed(value: Money) -> Self {
        Discount {
            kind: DiscountKind::Fixed,
            value: value.to_decimal(),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One cart/order line as submitted by the storefront.
///
/// Both fields are optional on the wire; a missing price or quantity counts
/// as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[serde(default)]
    #[ts(type = "string | null")]
    pub unit_price: Option<Money>,

    #[serde(default)]
    #[ts(type = "number | null")]
    pub quantity: Option<i64>,
}

impl LineItem {
    pub fn new(unit_price: Money, quantity: i64) -> Self {
        LineItem {
            unit_price: Some(unit_price),
            quantity: Some(quantity),
        }
    }

    /// Unrounded `unit_price * quantity`.
    ///
    /// Negative quantities degrade to zero, the same as a missing one.
    pub fn raw_total(&self) -> Decimal {
        let price = self.unit_price.unwrap_or_default().to_decimal();
        price.saturating_mul(Decimal::from(coerce_quantity(self.quantity)))
    }
}

/// Missing or negative quantities count as zero.
#[inline]
pub fn coerce_quantity(quantity: Option<i64>) -> i64 {
    quantity.unwrap_or(0).max(0)
}

/// A checkout submission: the lines plus an optional coupon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,

    #[serde(default)]
    pub coupon: Option<Discount>,
}

// =============================================================================
// Pet Profile
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
}

/// Life stage. `Puppy` and `Kitten` share the growth factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Puppy,
    Kitten,
    Adult,
    Senior,
}

impl AgeGroup {
    /// True for the growth stages (puppy, kitten).
    #[inline]
    pub fn is_juvenile(&self) -> bool {
        matches!(self, AgeGroup::Puppy | AgeGroup::Kitten)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[default]
    Maintain,
    LoseWeight,
    GainWeight,
}

/// Biometric answers from the feeding questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PetProfile {
    pub species: Species,
    pub weight_kg: f64,
    pub age_group: AgeGroup,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
}

// =============================================================================
// Subscription Plan Type
// =============================================================================

/// Subscription billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Weekly,
    Monthly,
    Quarterly,
}

impl PlanType {
    /// All plans, in the order quotes are presented.
    pub const fn all() -> [PlanType; 3] {
        [PlanType::Weekly, PlanType::Monthly, PlanType::Quarterly]
    }

    /// Days of food one delivery covers.
    pub const fn days(&self) -> u32 {
        match self {
            PlanType::Weekly => 7,
            PlanType::Monthly => 30,
            PlanType::Quarterly => 90,
        }
    }

    /// Label shown next to the plan price.
    pub const fn period_label(&self) -> &'static str {
        match self {
            PlanType::Weekly => "per week",
            PlanType::Monthly => "per month",
            PlanType::Quarterly => "per 3 months",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanType::Weekly => write!(f, "weekly"),
            PlanType::Monthly => write!(f, "monthly"),
            PlanType::Quarterly => write!(f, "quarterly"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.fraction(), Decimal::new(5, 2));
        assert_eq!(rate, TaxRate::from_fraction(Decimal::new(5, 2)));
        assert!(!rate.is_zero());
        assert!(TaxRate::zero().is_zero());
    }

    #[test]
    fn test_discount_kind_wire_names() {
        let d: Discount = serde_json::from_str(r#"{"type":"percentage","value":10}"#).unwrap();
        assert_eq!(d.kind, DiscountKind::Percentage);
        assert_eq!(d.value, Decimal::from(10));

        let d: Discount = serde_json::from_str(r#"{"type":"bogo","value":1}"#).unwrap();
        assert_eq!(d.kind, DiscountKind::Unsupported("bogo".to_string()));

        let json = serde_json::to_value(Discount::fixed(Money::from_fils(2_000))).unwrap();
        assert_eq!(json["type"], "fixed");
    }

    #[test]
    fn test_line_item_missing_fields_count_as_zero() {
        let item: LineItem = serde_json::from_str(r#"{"quantity":3}"#).unwrap();
        assert_eq!(item.raw_total(), Decimal::ZERO);

        let item: LineItem = serde_json::from_str(r#"{"unit_price":1.5}"#).unwrap();
        assert_eq!(item.raw_total(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_quantity_coerced() {
        let item = LineItem::new(Money::from_fils(1_000), -2);
        assert_eq!(item.raw_total(), Decimal::ZERO);
        assert_eq!(coerce_quantity(Some(-5)), 0);
        assert_eq!(coerce_quantity(None), 0);
        assert_eq!(coerce_quantity(Some(4)), 4);
    }

    #[test]
    fn test_pet_profile_snake_case() {
        let p: PetProfile = serde_json::from_str(
            r#"{"species":"dog","weight_kg":12.5,"age_group":"adult","activity_level":"high","goal":"lose_weight"}"#,
        )
        .unwrap();
        assert_eq!(p.species, Species::Dog);
        assert_eq!(p.goal, Goal::LoseWeight);

        let json = r#"{"species":"cat","weight_kg":4,"age_group":"kitten"}"#;
        let p: PetProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.activity_level, ActivityLevel::Normal);
        assert_eq!(p.goal, Goal::Maintain);
    }

    #[test]
    fn test_plan_days() {
        let days: Vec<u32> = PlanType::all().iter().map(|p| p.days()).collect();
        assert_eq!(days, vec![7, 30, 90]);
    }
}
