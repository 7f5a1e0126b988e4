//! # Validation Module
//!
//! Input validation for everything that enters the cart from the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront                                                   │
//! │  ├── Quantity stepper never goes below 1                               │
//! │  └── Coupon input disabled while a coupon is active                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: karigar-core (THIS MODULE)                                   │
//! │  ├── Quantity range, price range, text lengths                         │
//! │  └── Coupon code format                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CartStore                                                    │
//! │  └── Identity rules (duplicate / unknown ids)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartItem, Customization};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted personalization note.
pub const MAX_PERSONALIZATION_LEN: usize = 200;

/// Longest accepted customization value.
pub const MAX_CUSTOMIZATION_VALUE_LEN: usize = 60;

/// Longest accepted coupon code.
pub const MAX_COUPON_CODE_LEN: usize = 20;

/// Largest accepted amount for a single price or configured amount (₹1 crore).
pub const MAX_PRICE: Money = Money::from_rupees(10_000_000);

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item display name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an optional personalization note.
///
/// ```rust
/// use karigar_core::validation::validate_personalization;
///
/// assert!(validate_personalization(None).is_ok());
/// assert!(validate_personalization(Some("Wedding saree with golden zari work")).is_ok());
/// assert!(validate_personalization(Some(&"x".repeat(201))).is_err());
/// ```
pub fn validate_personalization(text: Option<&str>) -> ValidationResult<()> {
    match text {
        Some(text) if text.chars().count() > MAX_PERSONALIZATION_LEN => {
            Err(ValidationError::TooLong {
                field: "personalization".to_string(),
                max: MAX_PERSONALIZATION_LEN,
            })
        }
        _ => Ok(()),
    }
}

/// Validates and normalizes a coupon code.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must not be empty, at most 20 characters
/// - Letters and digits only
///
/// ## Returns
/// The code in upper case, which is how the coupon table is keyed.
///
/// ```rust
/// use karigar_core::validation::normalize_coupon_code;
///
/// assert_eq!(normalize_coupon_code(" welcome10 ").unwrap(), "WELCOME10");
/// assert!(normalize_coupon_code("").is_err());
/// assert!(normalize_coupon_code("HALF-OFF").is_err());
/// ```
pub fn normalize_coupon_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.chars().count() > MAX_COUPON_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: MAX_COUPON_CODE_LEN,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must contain only letters and numbers".to_string(),
        });
    }

    Ok(code.to_ascii_uppercase())
}

/// Validates a customization value: non-empty after trimming, at most 60
/// characters.
///
/// Applied to every line entering the cart, including lines deserialized
/// from the storefront that never went through [`Customization::parse`].
pub fn validate_customization(customization: &Customization) -> ValidationResult<()> {
    let value = customization.value().trim();
    let field = format!("{} customization", customization.category());

    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }

    if value.chars().count() > MAX_CUSTOMIZATION_VALUE_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_CUSTOMIZATION_VALUE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## User Workflow
/// ```text
/// Quantity stepper: [-] 1 [+]
///       │
///       ▼
/// validate_quantity(n) ← THIS FUNCTION
///       │
///       ├── n == 0?   → Error, quantity stays as it was
///       ├── n > 999?  → Error, quantity stays as it was
///       └── OK        → update_quantity proceeds
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 || i64::from(qty) > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (free samples), negatives are not,
/// and nothing above [`MAX_PRICE`].
///
/// ```rust
/// use karigar_core::money::Money;
/// use karigar_core::validation::validate_price;
///
/// assert!(validate_price("price", Money::from_rupees(3_200)).is_ok());
/// assert!(validate_price("price", Money::zero()).is_ok());
/// assert!(validate_price("price", Money::from_paise(-1)).is_err());
/// assert!(validate_price("price", Money::from_rupees(20_000_000)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE.paise(),
        });
    }

    Ok(())
}

/// Validates a percentage rate in basis points (0% to 100%).
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits in the cart.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

/// Validates a whole cart line before it is added.
pub fn validate_cart_item(item: &CartItem) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_price("price", item.price)?;
    validate_price("original price", item.original_price)?;
    validate_quantity(item.quantity)?;
    validate_personalization(item.personalization.as_deref())?;
    for customization in &item.customizations {
        validate_customization(customization)?;
    }

    if item.id.as_str().trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
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

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_normalize_coupon_code() {
        assert_eq!(normalize_coupon_code("Artisan20").unwrap(), "ARTISAN20");
        assert!(normalize_coupon_code("   ").is_err());
        assert!(normalize_coupon_code(&"A".repeat(21)).is_err());
        assert!(normalize_coupon_code("NO SPACE").is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Terracotta Pottery Set").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_rate_bps() {
        assert!(validate_rate_bps("tax", 0).is_ok());
        assert!(validate_rate_bps("tax", 1800).is_ok());
        assert!(validate_rate_bps("tax", 10000).is_ok());
        assert!(validate_rate_bps("tax", 10001).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS - 1).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS).is_err());
    }

    #[test]
    fn test_validate_cart_item() {
        let item = CartItem::new("a", "Saree", Money::from_rupees(100));
        assert!(validate_cart_item(&item).is_ok());

        let zero_qty = item.clone().with_quantity(0);
        assert!(validate_cart_item(&zero_qty).is_err());

        let blank_id = CartItem::new(" ", "Saree", Money::from_rupees(100));
        assert!(validate_cart_item(&blank_id).is_err());
    }

    #[test]
    fn test_validate_price_ceiling() {
        assert!(validate_price("price", MAX_PRICE).is_ok());
        assert!(validate_price("price", MAX_PRICE + Money::from_paise(1)).is_err());
        assert!(validate_price("price", Money::from_paise(i64::MAX / 2)).is_err());
    }

    #[test]
    fn test_validate_cart_item_checks_customizations() {
        let item = CartItem::new("a", "Saree", Money::from_rupees(100))
            .with_customization(Customization::Color("Maroon".to_string()));
        assert!(validate_cart_item(&item).is_ok());

        let too_long = item
            .clone()
            .with_customization(Customization::Pattern("x".repeat(61)));
        assert!(matches!(
            validate_cart_item(&too_long),
            Err(ValidationError::TooLong { max: 60, .. })
        ));

        let blank = item.with_customization(Customization::Material("  ".to_string()));
        assert!(matches!(
            validate_cart_item(&blank),
            Err(ValidationError::Required { .. })
        ));
    }
}
