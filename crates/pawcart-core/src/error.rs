//! # Error Types
//!
//! Domain-specific error types for pawcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pawcart-core errors (this file)                                       │
//! │  ├── CoreError        - Checkout / quote failures                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  CLI errors (apps/cli)                                                 │
//! │  └── ConfigError      - Environment configuration failures             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (binary) → exit code       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## When Errors Happen At All
//! The calculators in `pricing`, `feeding` and `subscription` are total
//! functions: bad numbers degrade to zero. Errors only come out of the strict
//! entry points (`pricing::recompute_order`, `pricing::verify_client_total`,
//! `subscription::feeding_guide`) that the server uses before it persists
//! an order or attaches a subscription price to a cart line.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations detected on the strict path.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The total the client submitted does not match the server's
    /// recomputation.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout (client total: 7.000)
    ///      │
    ///      ▼
    /// recompute_order → 7.250
    ///      │
    ///      ▼
    /// TotalMismatch { submitted: 7.000, computed: 7.250 }
    ///      │
    ///      ▼
    /// Handler re-renders the cart with the server totals
    /// ```
    #[error("Submitted total {submitted} does not match computed total {computed}")]
    TotalMismatch { submitted: Money, computed: Money },

    /// Coupon type is neither `percentage` nor `fixed`.
    #[error("Unsupported discount type: {0}")]
    UnsupportedDiscount(String),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value may be zero but not negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is not a finite number.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TotalMismatch {
            submitted: Money::from_fils(7_000),
            computed: Money::from_fils(7_250),
        };
        assert_eq!(
            err.to_string(),
            "Submitted total 7.000 does not match computed total 7.250"
        );

        let err = CoreError::UnsupportedDiscount("bogo".to_string());
        assert_eq!(err.to_string(), "Unsupported discount type: bogo");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "items[0].unit_price".to_string(),
        };
        assert_eq!(err.to_string(), "items[0].unit_price is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: "999".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");

        let err = ValidationError::Negative {
            field: "unit_price".to_string(),
        };
        assert_eq!(err.to_string(), "unit_price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "weight_kg".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
