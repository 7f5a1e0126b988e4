//! # karigar-core: Pure Cart Pricing Logic
//!
//! This crate holds the cart pricing engine of the Karigar handcrafted-goods
//! storefront as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Karigar Cart Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront (browser)                         │   │
//! │  │     Cart page ──► Coupon box ──► Order summary ──► Checkout     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ serde / ts-rs types                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 karigar-store (CartStore)                       │   │
//! │  │   add_item, toggle, apply_coupon, breakdown, checkout, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ karigar-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │   cart   │ │ coupon  │ │ pricing │  │   │
//! │  │   │CartItem │ │  Money  │ │Selection │ │  Book   │ │Breakdown│  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING SINKS • NO NETWORK • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartItem, Customization, Rate, ...)
//! - [`money`] - Money type with integer paise arithmetic
//! - [`selection`] - The set of lines selected for checkout
//! - [`cart`] - Cart lines with their selection
//! - [`coupon`] - Coupon rules, table and active-coupon slot
//! - [`pricing`] - Price breakdown computation
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use karigar_core::{compute_breakdown, Cart, CartItem, CouponBook, Money, PricingConfig};
//!
//! let mut cart = Cart::new();
//! cart.add_item(CartItem::new("saree", "Banarasi Silk Saree", Money::from_rupees(12_500)))
//!     .unwrap();
//!
//! let book = CouponBook::default();
//! let b = compute_breakdown(
//!     cart.items(),
//!     cart.selection(),
//!     book.get("WELCOME10"),
//!     &PricingConfig::default(),
//! );
//! assert_eq!(b.discount, Money::from_rupees(1_250));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use coupon::{AppliedCoupon, CouponBook, CouponRule, CouponSlot};
pub use error::{CoreError, CoreResult, CouponError, ValidationError};
pub use money::Money;
pub use pricing::{compute_breakdown, PriceBreakdown, PricingConfig};
pub use selection::SelectionSet;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Guards against typing 1000 instead of 10 in the quantity box.
pub const MAX_ITEM_QUANTITY: i64 = 999;
