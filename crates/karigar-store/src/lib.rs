//! # karigar-store: Cart Store for the Karigar Storefront
//!
//! Owns a shopper's cart state and exposes it through named operations,
//! with configuration loading and structured logging around the pure
//! pricing logic in `karigar-core`.
//!
//! ## Modules
//!
//! - [`store`] - `CartStore`, the single owner of cart state
//! - [`checkout`] - The hand-off passed to the checkout screen
//! - [`config`] - Pricing constants and coupon table (TOML + env)
//! - [`error`] - Store and configuration errors
//! - [`sample`] - The showcase cart
//!
//! ## Example Usage
//!
//! ```rust
//! use karigar_store::{sample::sample_cart_items, CartStore};
//!
//! let mut store = CartStore::default();
//! for item in sample_cart_items() {
//!     store.add_item(item).unwrap();
//! }
//!
//! let applied = store.apply_coupon_code("ARTISAN20").unwrap();
//! assert_eq!(applied.discount.to_string(), "₹5,000.00");
//!
//! let handoff = store.checkout().unwrap();
//! assert_eq!(handoff.items.len(), 3);
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod sample;
pub mod store;

pub use checkout::CheckoutHandoff;
pub use config::StoreConfig;
pub use error::{ConfigError, ConfigResult, StoreError, StoreResult};
pub use store::CartStore;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=karigar_store=trace` - Trace the store only
/// - Default: INFO, with DEBUG for the karigar crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,karigar_store=debug,karigar_core=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
