//! # Store Error Types
//!
//! Errors surfaced by the cart store and its configuration loader.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Error Categories                             │
//! │                                                                         │
//! │  Cart errors (from karigar-core)                                       │
//! │  ├── Coupon          - Unknown code, minimum not met, already active   │
//! │  ├── Validation      - Quantity range, text lengths                    │
//! │  └── ItemNotFound    - Stale id from the storefront                    │
//! │                                                                         │
//! │  Checkout errors                                                       │
//! │  ├── EmptySelection  - "Please select items to checkout"               │
//! │  └── OutOfStock      - A selected line can't be shipped                │
//! │                                                                         │
//! │  Configuration errors (ConfigError)                                    │
//! │  ├── Io / Parse      - Config file unreadable                          │
//! │  └── Invalid*        - Values outside allowed ranges                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use karigar_core::{CoreError, CouponError, ItemId, ValidationError};
use thiserror::Error;

/// Errors from cart store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Cart, coupon or validation failure from the core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No saved-for-later entry with this id.
    #[error("Saved item not found: {0}")]
    SavedItemNotFound(ItemId),

    /// Checkout attempted with nothing selected.
    #[error("Please select items to checkout")]
    EmptySelection,

    /// A selected line is out of stock.
    #[error("{name} is out of stock")]
    OutOfStock { id: ItemId, name: String },
}

impl StoreError {
    /// The coupon failure, when this error came from applying a coupon.
    pub fn coupon_error(&self) -> Option<&CouponError> {
        match self {
            StoreError::Core(CoreError::Coupon(e)) => Some(e),
            _ => None,
        }
    }
}

impl From<CouponError> for StoreError {
    fn from(err: CouponError) -> Self {
        StoreError::Core(err.into())
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Duplicate coupon code in config: {0}")]
    DuplicateCoupon(String),

    #[error("No config path available")]
    NoConfigPath,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_error_passthrough() {
        let err: StoreError = CouponError::UnknownCode {
            code: "NOPE".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid coupon code: NOPE");
        assert!(matches!(
            err.coupon_error(),
            Some(CouponError::UnknownCode { .. })
        ));
    }

    #[test]
    fn test_empty_selection_message() {
        assert_eq!(
            StoreError::EmptySelection.to_string(),
            "Please select items to checkout"
        );
    }
}
