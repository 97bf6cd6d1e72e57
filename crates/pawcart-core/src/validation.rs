//! # Validation Module
//!
//! Boundary checks for the strict, server-authoritative path.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront (JavaScript)                                      │
//! │  ├── Form checks, immediate feedback                                   │
//! │  └── Display totals via the same formulas                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Request handler (Rust)                                       │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculators                                                  │
//! │  └── Total functions; anything left over degrades to zero              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pawcart_core::validation::{validate_quantity, validate_weight_kg};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_weight_kg(0.0).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{AgeGroup, Discount, DiscountKind, LineItem, PetProfile, Species};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PET_WEIGHT_KG};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Order Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free samples).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates one cart line; `index` only feeds the field name in errors.
pub fn validate_line_item(index: usize, item: &LineItem) -> ValidationResult<()> {
    let price = item.unit_price.ok_or_else(|| ValidationError::Required {
        field: format!("items[{index}].unit_price"),
    })?;
    validate_price(price)?;

    let qty = item.quantity.ok_or_else(|| ValidationError::Required {
        field: format!("items[{index}].quantity"),
    })?;
    validate_quantity(qty)
}

/// Validates every line of a cart and its size.
///
/// ## Rules
/// - At most MAX_CART_ITEMS (100) lines
/// - Every line has a non-negative price and a quantity in 1..=999
pub fn validate_cart(items: &[LineItem]) -> CoreResult<()> {
    if items.len() > MAX_CART_ITEMS {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        });
    }

    for (index, item) in items.iter().enumerate() {
        validate_line_item(index, item)?;
    }

    Ok(())
}

/// Validates a coupon.
///
/// ## Rules
/// - Type must be `percentage` or `fixed`
/// - Percentage value in 0..=100
/// - Fixed value non-negative
pub fn validate_discount(discount: &Discount) -> CoreResult<()> {
    match &discount.kind {
        DiscountKind::Percentage => {
            if discount.value < Decimal::ZERO || discount.value > Decimal::ONE_HUNDRED {
                return Err(ValidationError::OutOfRange {
                    field: "coupon.value".to_string(),
                    min: "0".to_string(),
                    max: "100".to_string(),
                }
                .into());
            }
        }
        DiscountKind::Fixed => {
            if discount.value < Decimal::ZERO {
                return Err(ValidationError::Negative {
                    field: "coupon.value".to_string(),
                }
                .into());
            }
        }
        DiscountKind::Unsupported(kind) => {
            return Err(CoreError::UnsupportedDiscount(kind.clone()));
        }
    }

    Ok(())
}

// =============================================================================
// Pet Profile Validators
// =============================================================================

/// Validates a body weight in kilograms.
///
/// ## Rules
/// - Must be a finite number
/// - Must be positive and at most MAX_PET_WEIGHT_KG
pub fn validate_weight_kg(weight_kg: f64) -> ValidationResult<()> {
    if !weight_kg.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "weight_kg".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if weight_kg <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "weight_kg".to_string(),
        });
    }

    if weight_kg > MAX_PET_WEIGHT_KG {
        return Err(ValidationError::OutOfRange {
            field: "weight_kg".to_string(),
            min: "0".to_string(),
            max: MAX_PET_WEIGHT_KG.to_string(),
        });
    }

    Ok(())
}

/// Validates that the life stage exists for the species.
///
/// Puppies are dogs and kittens are cats.
pub fn validate_age_group(species: Species, age_group: AgeGroup) -> ValidationResult<()> {
    let allowed = match species {
        Species::Dog => ["puppy", "adult", "senior"],
        Species::Cat => ["kitten", "adult", "senior"],
    };

    let mismatched = matches!(
        (species, age_group),
        (Species::Dog, AgeGroup::Kitten) | (Species::Cat, AgeGroup::Puppy)
    );

    if mismatched {
        return Err(ValidationError::NotAllowed {
            field: "age_group".to_string(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(())
}

/// Validates a full questionnaire profile.
pub fn validate_pet_profile(profile: &PetProfile) -> ValidationResult<()> {
    validate_weight_kg(profile.weight_kg)?;
    validate_age_group(profile.species, profile.age_group)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityLevel, Goal};

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_fils(1_500)).is_ok());

        let err = validate_price(Money::from_fils(-1)).unwrap_err();
        assert_eq!(err.to_string(), "unit_price must not be negative");
    }

    #[test]
    fn test_validate_line_item_names_field() {
        let item = LineItem {
            unit_price: None,
            quantity: Some(1),
        };
        let err = validate_line_item(2, &item).unwrap_err();
        assert_eq!(err.to_string(), "items[2].unit_price is required");
    }

    #[test]
    fn test_validate_cart_size() {
        let items = vec![LineItem::new(Money::from_fils(100), 1); MAX_CART_ITEMS + 1];
        assert!(matches!(
            validate_cart(&items),
            Err(CoreError::CartTooLarge { .. })
        ));
        assert!(validate_cart(&items[..MAX_CART_ITEMS]).is_ok());
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(&Discount::percentage(Decimal::from(100))).is_ok());
        assert!(validate_discount(&Discount::percentage(Decimal::from(101))).is_err());
        assert!(validate_discount(&Discount::percentage(Decimal::from(-1))).is_err());
        assert!(validate_discount(&Discount::fixed(Money::from_fils(2_000))).is_ok());
        assert!(validate_discount(&Discount::fixed(Money::from_fils(-1))).is_err());
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight_kg(4.2).is_ok());
        assert!(validate_weight_kg(0.0).is_err());
        assert!(validate_weight_kg(-3.0).is_err());
        assert!(validate_weight_kg(f64::NAN).is_err());
        assert!(validate_weight_kg(500.0).is_err());
    }

    #[test]
    fn test_validate_age_group_by_species() {
        assert!(validate_age_group(Species::Dog, AgeGroup::Puppy).is_ok());
        assert!(validate_age_group(Species::Cat, AgeGroup::Kitten).is_ok());
        assert!(validate_age_group(Species::Cat, AgeGroup::Puppy).is_err());
        assert!(validate_age_group(Species::Dog, AgeGroup::Kitten).is_err());
    }

    #[test]
    fn test_validate_pet_profile() {
        let profile = PetProfile {
            species: Species::Cat,
            weight_kg: 4.0,
            age_group: AgeGroup::Adult,
            activity_level: ActivityLevel::Normal,
            goal: Goal::Maintain,
        };
        assert!(validate_pet_profile(&profile).is_ok());

        let bad = PetProfile {
            weight_kg: 0.0,
            ..profile
        };
        assert!(validate_pet_profile(&bad).is_err());
    }
}
