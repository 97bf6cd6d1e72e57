//! # Order Pricing Engine
//!
//! Pure functions that turn cart inputs into order amounts. The storefront
//! uses them for display; the checkout handler uses them again to recompute
//! every order server-side, because client-submitted totals are never
//! trusted.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    recalculate_cart_totals                              │
//! │                                                                         │
//! │  items ──► subtotal (raw, rounded once)                                │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  coupon ──► apply_discount ──► discounted amount                       │
//! │                │                     │                                  │
//! │                │            ┌────────┴────────┐                         │
//! │                │            ▼                 ▼                         │
//! │                │          tax()          shipping()                     │
//! │                │            │                 │                         │
//! │                ▼            ▼                 ▼                         │
//! │  discount = raw - discounted    total = discounted + tax + shipping    │
//! │                                                                         │
//! │  Discount ALWAYS comes before tax and shipping.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Every helper rounds its own result half-up to three places before it
//! returns, except `subtotal`, which sums the raw line products and rounds
//! once.
//!
//! ## Bad Input
//! The helpers are total: absent prices, non-positive quantities and zero
//! rates produce `0`. Use [`recompute_order`] when a bad input should be an
//! error instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::settings::PricingSettings;
use crate::types::{CheckoutRequest, Discount, DiscountKind, LineItem, TaxRate};
use crate::validation;

// =============================================================================
// Result Types
// =============================================================================

/// Inputs to [`order_total`]. Omitted components default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderComponents {
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub discount: Money,
}

/// Breakdown persisted on the order record and printed on receipts.
///
/// ## Invariant
/// `total == max(0, subtotal + tax + shipping - discount)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Sum of the lines before any coupon.
    #[ts(type = "string")]
    pub subtotal: Money,
    /// Amount the coupon took off the subtotal.
    #[ts(type = "string")]
    pub discount: Money,
    #[ts(type = "string")]
    pub tax: Money,
    #[ts(type = "string")]
    pub shipping: Money,
    #[ts(type = "string")]
    pub total: Money,
}

// =============================================================================
// Line & Cart Amounts
// =============================================================================

/// Total for a single product line: `round3(unit_price * quantity)`.
///
/// Returns zero when the price is absent or zero, or when the quantity is
/// not positive. The quantity does not have to be whole.
///
/// ## Example
/// ```rust
/// use pawcart_core::money::Money;
/// use pawcart_core::pricing::product_total;
/// use rust_decimal::Decimal;
///
/// let total = product_total(Some(Money::from_fils(1_333)), Decimal::from(3));
/// assert_eq!(total.to_string(), "3.999");
/// ```
pub fn product_total(unit_price: Option<Money>, quantity: Decimal) -> Money {
    match unit_price {
        Some(price) if !price.is_zero() && quantity > Decimal::ZERO => price.times(quantity),
        _ => Money::zero(),
    }
}

/// Cart subtotal: sums the raw line products and rounds once at the end.
pub fn subtotal(items: &[LineItem]) -> Money {
    if items.is_empty() {
        return Money::zero();
    }

    let raw = items
        .iter()
        .map(LineItem::raw_total)
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line));
    Money::from_decimal(raw)
}

// =============================================================================
// Discount, Tax, Shipping
// =============================================================================

/// Applies a coupon to an amount.
///
/// ## Rules
/// - No coupon, or `amount <= 0`: amount returned unchanged
/// - `percentage`: subtract `amount * value / 100`
/// - `fixed`: subtract `value`
/// - any other type: no-op
/// - result never goes below zero
///
/// ## Example
/// ```rust
/// use pawcart_core::money::Money;
/// use pawcart_core::pricing::apply_discount;
/// use pawcart_core::types::Discount;
///
/// let amount = Money::from_fils(5_000);
/// let coupon = Discount::fixed(Money::from_fils(10_000));
/// assert_eq!(apply_discount(amount, Some(&coupon)), Money::zero());
/// ```
pub fn apply_discount(amount: Money, discount: Option<&Discount>) -> Money {
    let Some(discount) = discount else {
        return amount;
    };
    if !amount.is_positive() {
        return amount;
    }

    let discounted = match &discount.kind {
        DiscountKind::Percentage => amount.apply_percentage_discount(discount.value),
        DiscountKind::Fixed => {
            Money::from_decimal(amount.to_decimal().saturating_sub(discount.value))
        }
        DiscountKind::Unsupported(kind) => {
            debug!(kind = %kind, "ignoring unsupported discount type");
            amount
        }
    };

    discounted.coerce_non_negative()
}

/// Tax on an amount: `round3(amount * rate)`, zero for a zero rate or a
/// non-positive amount.
pub fn tax(amount: Money, rate: TaxRate) -> Money {
    if rate.is_zero() || !amount.is_positive() {
        return Money::zero();
    }
    amount.calculate_tax(rate)
}

/// Flat shipping fee, waived when `amount` reaches `free_threshold`.
///
/// The fee is not proportional to the amount; `rate` is returned as-is.
///
/// ## Example
/// ```rust
/// use pawcart_core::money::Money;
/// use pawcart_core::pricing::shipping;
///
/// let fee = Money::from_fils(2_000);
/// assert_eq!(shipping(Money::from_fils(10_000), fee, None), fee);
/// assert_eq!(
///     shipping(Money::from_fils(50_000), fee, Some(Money::from_fils(30_000))),
///     Money::zero()
/// );
/// ```
pub fn shipping(amount: Money, rate: Money, free_threshold: Option<Money>) -> Money {
    match free_threshold {
        Some(threshold) if amount >= threshold => Money::zero(),
        _ => rate,
    }
}

/// Grand total: `max(0, subtotal + tax + shipping - discount)`.
pub fn order_total(components: &OrderComponents) -> Money {
    (components.subtotal + components.tax + components.shipping - components.discount)
        .coerce_non_negative()
}

// =============================================================================
// Composite
// =============================================================================

/// Recomputes every cart amount from scratch.
///
/// Tax and shipping are charged on the discounted amount. No free-shipping
/// threshold applies; see [`recalculate_cart_totals_with`].
///
/// ## Example
/// ```rust
/// use pawcart_core::money::Money;
/// use pawcart_core::pricing::recalculate_cart_totals;
/// use pawcart_core::types::{LineItem, TaxRate};
///
/// let items = [
///     LineItem::new(Money::from_fils(1_500), 2),
///     LineItem::new(Money::from_fils(2_000), 1),
/// ];
/// let totals = recalculate_cart_totals(
///     &items,
///     None,
///     TaxRate::from_bps(500),
///     Money::from_fils(2_000),
/// );
/// assert_eq!(totals.subtotal.to_string(), "5.000");
/// assert_eq!(totals.tax.to_string(), "0.250");
/// assert_eq!(totals.total.to_string(), "7.250");
/// ```
pub fn recalculate_cart_totals(
    items: &[LineItem],
    coupon: Option<&Discount>,
    tax_rate: TaxRate,
    shipping_rate: Money,
) -> CartTotals {
    let settings = PricingSettings {
        tax_rate,
        shipping_rate,
        free_shipping_threshold: None,
    };
    recalculate_cart_totals_with(items, coupon, &settings)
}

/// Same as [`recalculate_cart_totals`], taking rates and the free-shipping
/// threshold from `settings`.
pub fn recalculate_cart_totals_with(
    items: &[LineItem],
    coupon: Option<&Discount>,
    settings: &PricingSettings,
) -> CartTotals {
    let raw_subtotal = subtotal(items);

    let discounted = apply_discount(raw_subtotal, coupon);
    let discount = raw_subtotal - discounted;

    let tax = tax(discounted, settings.tax_rate);
    let shipping = shipping(
        discounted,
        settings.shipping_rate,
        settings.free_shipping_threshold,
    );

    // Discount is already inside `discounted`.
    let total = order_total(&OrderComponents {
        subtotal: discounted,
        tax,
        shipping,
        discount: Money::zero(),
    });

    debug!(
        lines = items.len(),
        subtotal = %raw_subtotal,
        discount = %discount,
        tax = %tax,
        shipping = %shipping,
        total = %total,
        "cart totals recalculated"
    );

    CartTotals {
        subtotal: raw_subtotal,
        discount,
        tax,
        shipping,
        total,
    }
}

// =============================================================================
// Strict Path
// =============================================================================

/// Validates a checkout submission, then recomputes its totals.
///
/// This is the server-authoritative path: anything the total functions would
/// silently zero out (missing prices, zero quantities, unknown coupon types)
/// is an error here.
pub fn recompute_order(
    request: &CheckoutRequest,
    settings: &PricingSettings,
) -> CoreResult<CartTotals> {
    validation::validate_cart(&request.items).map_err(|e| {
        warn!(error = %e, "rejected checkout items");
        e
    })?;

    if let Some(coupon) = &request.coupon {
        validation::validate_discount(coupon).map_err(|e| {
            warn!(error = %e, "rejected checkout coupon");
            e
        })?;
    }

    Ok(recalculate_cart_totals_with(
        &request.items,
        request.coupon.as_ref(),
        settings,
    ))
}

/// Checks a client-submitted total against the server recomputation.
pub fn verify_client_total(submitted: Money, computed: &CartTotals) -> CoreResult<()> {
    if submitted != computed.total {
        warn!(submitted = %submitted, computed = %computed.total, "client total mismatch");
        return Err(CoreError::TotalMismatch {
            submitted,
            computed: computed.total,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn m(fils: i64) -> Money {
        Money::from_fils(fils)
    }

    #[test]
    fn test_product_total() {
        assert_eq!(product_total(Some(m(1_500)), Decimal::from(2)), m(3_000));
        assert_eq!(product_total(Some(m(1_500)), Decimal::ZERO), Money::zero());
        assert_eq!(product_total(Some(m(1_500)), Decimal::from(-1)), Money::zero());
        assert_eq!(product_total(None, Decimal::from(2)), Money::zero());
        assert_eq!(product_total(Some(Money::zero()), Decimal::from(2)), Money::zero());
    }

    #[test]
    fn test_product_total_repeating_fraction() {
        assert_eq!(product_total(Some(m(1_333)), Decimal::from(3)), m(3_999));
    }

    #[test]
    fn test_product_total_fractional_quantity() {
        // 1.333 * 1.5 = 1.9995 -> 2.000
        assert_eq!(product_total(Some(m(1_333)), Decimal::new(15, 1)), m(2_000));
    }

    #[test]
    fn test_subtotal() {
        assert_eq!(subtotal(&[]), Money::zero());

        let items = [LineItem::new(m(1_500), 2), LineItem::new(m(2_000), 1)];
        assert_eq!(subtotal(&items), m(5_000));
    }

    #[test]
    fn test_subtotal_missing_fields_count_as_zero() {
        let items = [
            LineItem::new(m(1_000), 1),
            LineItem {
                unit_price: None,
                quantity: Some(4),
            },
            LineItem {
                unit_price: Some(m(500)),
                quantity: None,
            },
        ];
        assert_eq!(subtotal(&items), m(1_000));
    }

    #[test]
    fn test_apply_discount_percentage() {
        let coupon = Discount::percentage(Decimal::from(10));
        assert_eq!(apply_discount(m(10_000), Some(&coupon)), m(9_000));
    }

    #[test]
    fn test_apply_discount_fixed() {
        let coupon = Discount::fixed(m(2_000));
        assert_eq!(apply_discount(m(10_000), Some(&coupon)), m(8_000));
    }

    #[test]
    fn test_apply_discount_never_negative() {
        let coupon = Discount::fixed(m(10_000));
        assert_eq!(apply_discount(m(5_000), Some(&coupon)), Money::zero());

        let coupon = Discount::percentage(Decimal::from(150));
        assert_eq!(apply_discount(m(5_000), Some(&coupon)), Money::zero());
    }

    #[test]
    fn test_apply_discount_passthrough() {
        assert_eq!(apply_discount(m(10_000), None), m(10_000));

        let coupon = Discount::fixed(m(1_000));
        assert_eq!(apply_discount(Money::zero(), Some(&coupon)), Money::zero());

        let unknown = Discount {
            kind: DiscountKind::Unsupported("bogo".to_string()),
            value: Decimal::from(50),
        };
        assert_eq!(apply_discount(m(10_000), Some(&unknown)), m(10_000));
    }

    #[test]
    fn test_tax() {
        assert_eq!(tax(m(10_000), TaxRate::from_bps(500)), m(500));
        assert_eq!(tax(m(10_000), TaxRate::zero()), Money::zero());
        assert_eq!(tax(Money::zero(), TaxRate::from_bps(500)), Money::zero());
    }

    #[test]
    fn test_shipping() {
        assert_eq!(shipping(m(10_000), m(2_000), None), m(2_000));
        assert_eq!(shipping(m(50_000), m(2_000), Some(m(30_000))), Money::zero());
        assert_eq!(shipping(m(30_000), m(2_000), Some(m(30_000))), Money::zero());
        assert_eq!(shipping(m(29_999), m(2_000), Some(m(30_000))), m(2_000));
    }

    #[test]
    fn test_order_total() {
        let components = OrderComponents {
            subtotal: m(5_000),
            tax: m(250),
            shipping: m(2_000),
            discount: m(500),
        };
        assert_eq!(order_total(&components), m(6_750));
        assert_eq!(order_total(&OrderComponents::default()), Money::zero());

        let negative = OrderComponents {
            subtotal: m(1_000),
            discount: m(5_000),
            ..Default::default()
        };
        assert_eq!(order_total(&negative), Money::zero());
    }

    #[test]
    fn test_order_components_default_missing_fields() {
        let c: OrderComponents = serde_json::from_str(r#"{"subtotal":5}"#).unwrap();
        assert_eq!(order_total(&c), m(5_000));
    }

    #[test]
    fn test_recalculate_cart_totals_no_coupon() {
        let items = [LineItem::new(m(1_500), 2), LineItem::new(m(2_000), 1)];
        let totals = recalculate_cart_totals(&items, None, TaxRate::from_bps(500), m(2_000));

        assert_eq!(totals.subtotal, m(5_000));
        assert_eq!(totals.discount, Money::zero());
        assert_eq!(totals.tax, m(250));
        assert_eq!(totals.shipping, m(2_000));
        assert_eq!(totals.total, m(7_250));
    }

    #[test]
    fn test_recalculate_cart_totals_taxes_discounted_amount() {
        let items = [LineItem::new(m(10_000), 1)];
        let coupon = Discount::percentage(Decimal::from(10));
        let totals =
            recalculate_cart_totals(&items, Some(&coupon), TaxRate::from_bps(500), m(2_000));

        assert_eq!(totals.subtotal, m(10_000));
        assert_eq!(totals.discount, m(1_000));
        // 5% of 9.000, not of 10.000
        assert_eq!(totals.tax, m(450));
        assert_eq!(totals.total, m(11_450));
        assert_eq!(
            totals.total,
            order_total(&OrderComponents {
                subtotal: totals.subtotal,
                tax: totals.tax,
                shipping: totals.shipping,
                discount: totals.discount,
            })
        );
    }

    #[test]
    fn test_free_shipping_checks_discounted_amount() {
        let settings = PricingSettings {
            tax_rate: TaxRate::zero(),
            shipping_rate: m(2_000),
            free_shipping_threshold: Some(m(25_000)),
        };
        let items = [LineItem::new(m(26_000), 1)];

        let full = recalculate_cart_totals_with(&items, None, &settings);
        assert_eq!(full.shipping, Money::zero());

        let coupon = Discount::fixed(m(2_000));
        let discounted = recalculate_cart_totals_with(&items, Some(&coupon), &settings);
        assert_eq!(discounted.shipping, m(2_000));
        assert_eq!(discounted.total, m(26_000));
    }

    #[test]
    fn test_pricing_is_deterministic() {
        let items = [LineItem::new(m(1_333), 7), LineItem::new(m(2_499), 3)];
        let coupon = Discount::percentage(Decimal::new(125, 1));
        let a = recalculate_cart_totals(&items, Some(&coupon), TaxRate::from_bps(500), m(2_000));
        let b = recalculate_cart_totals(&items, Some(&coupon), TaxRate::from_bps(500), m(2_000));
        assert_eq!(a, b);
    }

    #[test]
    fn test_recompute_order_rejects_bad_lines() {
        let settings = PricingSettings::default();

        let request = CheckoutRequest {
            items: vec![LineItem::new(m(1_000), 0)],
            coupon: None,
        };
        assert!(matches!(
            recompute_order(&request, &settings),
            Err(CoreError::Validation(_))
        ));

        let request = CheckoutRequest {
            items: vec![LineItem {
                unit_price: None,
                quantity: Some(1),
            }],
            coupon: None,
        };
        assert!(recompute_order(&request, &settings).is_err());
    }

    #[test]
    fn test_recompute_order_rejects_unknown_coupon() {
        let request = CheckoutRequest {
            items: vec![LineItem::new(m(1_000), 1)],
            coupon: Some(Discount {
                kind: DiscountKind::Unsupported("bogo".to_string()),
                value: Decimal::ONE,
            }),
        };
        assert!(matches!(
            recompute_order(&request, &PricingSettings::default()),
            Err(CoreError::UnsupportedDiscount(kind)) if kind == "bogo"
        ));
    }

    #[test]
    fn test_recompute_order_matches_total_functions() {
        let settings = PricingSettings::default();
        let request = CheckoutRequest {
            items: vec![LineItem::new(m(1_500), 2), LineItem::new(m(2_000), 1)],
            coupon: Some(Discount::fixed(m(500))),
        };
        let strict = recompute_order(&request, &settings).unwrap();
        let lenient =
            recalculate_cart_totals_with(&request.items, request.coupon.as_ref(), &settings);
        assert_eq!(strict, lenient);
    }

    #[test]
    fn test_verify_client_total() {
        let items = [LineItem::new(m(1_500), 2), LineItem::new(m(2_000), 1)];
        let totals = recalculate_cart_totals(&items, None, TaxRate::from_bps(500), m(2_000));

        assert!(verify_client_total(m(7_250), &totals).is_ok());
        assert!(matches!(
            verify_client_total(m(7_000), &totals),
            Err(CoreError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_cart_totals_wire_shape() {
        let totals = CartTotals {
            subtotal: m(5_000),
            discount: Money::zero(),
            tax: m(250),
            shipping: m(2_000),
            total: m(7_250),
        };
        let json = serde_json::to_value(totals).unwrap();
        assert_eq!(json["total"], "7.250");
        assert_eq!(json["discount"], "0.000");
    }
}
