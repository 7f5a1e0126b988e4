//! # Error Types
//!
//! Domain-specific error types for karigar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  karigar-core errors (this file)                                       │
//! │  ├── CoreError        - Cart operation failures                        │
//! │  ├── CouponError      - Coupon lookup / eligibility failures           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  karigar-store errors (separate crate)                                 │
//! │  ├── StoreError       - Store and checkout failures                    │
//! │  └── ConfigError      - Configuration loading failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Storefront message   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is locally recoverable: the cart is left unchanged and the
//! message is shown to the shopper.

use thiserror::Error;

use crate::money::Money;
use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart operation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No line with this id is in the cart.
    #[error("Item not in cart: {0}")]
    ItemNotFound(ItemId),

    /// A line with this id is already in the cart.
    #[error("Item already in cart: {0}")]
    DuplicateItem(ItemId),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Coupon could not be applied.
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Coupon Error
// =============================================================================

/// Reasons a coupon code is refused.
///
/// ## User Workflow
/// ```text
/// Enter "craft25" ──► Apply
///      │
///      ▼
/// lookup "CRAFT25" ── not in table ──► UnknownCode
///      │
///      ▼
/// selected subtotal ₹5,000 < minimum ₹15,000
///      │
///      ▼
/// MinimumNotMet { minimum: ₹15,000, shortfall: ₹10,000 }
///      │
///      ▼
/// UI shows: "Minimum purchase of ₹15,000.00 required for this coupon"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    /// Code is not in the coupon table.
    #[error("Invalid coupon code: {code}")]
    UnknownCode { code: String },

    /// Selected subtotal is below the coupon's minimum purchase.
    #[error("Minimum purchase of {minimum} required for {code} (add {shortfall} more)")]
    MinimumNotMet {
        code: String,
        minimum: Money,
        shortfall: Money,
    },

    /// Another coupon must be removed before a new one is applied.
    #[error("Coupon {active} is already applied; remove it first")]
    AlreadyActive { active: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input from the storefront doesn't meet
/// requirements. Checked before any cart state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
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
    fn test_coupon_error_messages() {
        let err = CouponError::MinimumNotMet {
            code: "CRAFT25".to_string(),
            minimum: Money::from_rupees(15_000),
            shortfall: Money::from_rupees(10_000),
        };
        assert_eq!(
            err.to_string(),
            "Minimum purchase of ₹15,000.00 required for CRAFT25 (add ₹10,000.00 more)"
        );

        let err = CouponError::UnknownCode {
            code: "NOPE".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid coupon code: NOPE");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = CouponError::UnknownCode {
            code: "X".to_string(),
        }
        .into();
        assert_eq!(core_err.to_string(), "Invalid coupon code: X");
    }
}
