//! # Cart Store
//!
//! The one owner of a shopper's cart. Views read from it and change it only
//! through the operations below; the order summary is recomputed on demand.
//!
//! ## Store Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront Action          Store Operation          Effect             │
//! │  ─────────────────          ───────────────          ──────             │
//! │  Add to cart ─────────────► add_item() ────────────► line added+selected│
//! │  Quantity stepper ────────► update_quantity() ─────► qty = n (1..=999)  │
//! │  Remove ──────────────────► remove_item() ─────────► line+selection gone│
//! │  Remove Selected ─────────► remove_selected() ─────► selected lines gone│
//! │  Save for later ──────────► move_to_saved() ───────► cart → wishlist    │
//! │  Move to Wishlist ────────► move_selected_to_saved() selected → saved   │
//! │  Move to cart ────────────► move_to_cart() ────────► wishlist → cart    │
//! │  Line checkbox ───────────► toggle() ──────────────► flip selection     │
//! │  Coupon box ──────────────► enter_coupon_code()                         │
//! │  Apply / Remove ──────────► apply_coupon() / remove_coupon()            │
//! │  Order summary ───────────► breakdown() ───────────► (read only)        │
//! │  Proceed to checkout ─────► checkout() ────────────► CheckoutHandoff    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation completes synchronously. A failed operation leaves the
//! store exactly as it was.

use tracing::{debug, info};

use karigar_core::{
    compute_breakdown, AppliedCoupon, Cart, CartItem, CoreError, CouponBook, CouponRule,
    CouponSlot, ItemId, PriceBreakdown, PricingConfig,
};

use crate::checkout::CheckoutHandoff;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// A shopper's cart, saved-for-later list and coupon state.
#[derive(Debug, Clone)]
pub struct CartStore {
    cart: Cart,
    saved: Vec<CartItem>,
    coupon: CouponSlot,
    coupons: CouponBook,
    pricing: PricingConfig,
}

impl CartStore {
    /// Creates an empty store with the given pricing and coupon table.
    pub fn new(pricing: PricingConfig, coupons: CouponBook) -> Self {
        CartStore {
            cart: Cart::new(),
            saved: Vec::new(),
            coupon: CouponSlot::new(),
            coupons,
            pricing,
        }
    }

    /// Creates an empty store from loaded configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.pricing_config(), config.coupon_book())
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn saved_for_later(&self) -> &[CartItem] {
        &self.saved
    }

    pub fn coupon(&self) -> &CouponSlot {
        &self.coupon
    }

    pub fn coupons(&self) -> &CouponBook {
        &self.coupons
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    // =========================================================================
    // Cart Lines
    // =========================================================================

    /// Adds a line to the cart and selects it.
    pub fn add_item(&mut self, item: CartItem) -> StoreResult<()> {
        debug!(id = %item.id, name = %item.name, quantity = item.quantity, "Adding item to cart");
        self.cart.add_item(item)?;
        Ok(())
    }

    /// Changes a line's quantity. Values outside `1..=999` are refused.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: u32) -> StoreResult<()> {
        debug!(id = %id, quantity, "Updating quantity");
        self.cart.update_quantity(id, quantity)?;
        Ok(())
    }

    /// Removes a line; its selection goes with it.
    pub fn remove_item(&mut self, id: &ItemId) -> StoreResult<CartItem> {
        debug!(id = %id, "Removing item from cart");
        Ok(self.cart.remove_item(id)?)
    }

    /// Removes every selected line. Returns the removed lines.
    pub fn remove_selected(&mut self) -> Vec<CartItem> {
        let ids = self.selected_ids();
        let removed = self.cart.remove_items(&ids);
        debug!(removed = removed.len(), "Removed selected items");
        removed
    }

    fn selected_ids(&self) -> Vec<ItemId> {
        self.cart.selection().iter().cloned().collect()
    }

    // =========================================================================
    // Saved for Later
    // =========================================================================

    /// Moves a line from the cart to the saved-for-later list.
    ///
    /// An earlier saved entry with the same id is replaced.
    pub fn move_to_saved(&mut self, id: &ItemId) -> StoreResult<()> {
        let item = self.cart.remove_item(id)?;
        debug!(id = %id, "Moving item to saved for later");

        self.saved.retain(|s| &s.id != id);
        self.saved.push(item);
        Ok(())
    }

    /// Moves every selected line to the saved-for-later list. Returns how
    /// many lines moved.
    pub fn move_selected_to_saved(&mut self) -> usize {
        let ids = self.selected_ids();
        let moved = self.cart.remove_items(&ids);
        let count = moved.len();

        self.saved.retain(|s| !ids.contains(&s.id));
        self.saved.extend(moved);
        debug!(moved = count, "Moved selected items to saved for later");
        count
    }

    /// Moves a saved entry back into the cart with quantity 1.
    ///
    /// The entry stays saved if the cart refuses it.
    pub fn move_to_cart(&mut self, id: &ItemId) -> StoreResult<()> {
        let index = self.saved_index(id)?;
        let item = self.saved[index].clone().with_quantity(1);

        self.cart.add_item(item)?;
        self.saved.remove(index);
        debug!(id = %id, "Moved saved item back to cart");
        Ok(())
    }

    /// Deletes a saved entry.
    pub fn discard_saved(&mut self, id: &ItemId) -> StoreResult<CartItem> {
        let index = self.saved_index(id)?;
        debug!(id = %id, "Discarding saved item");
        Ok(self.saved.remove(index))
    }

    fn saved_index(&self, id: &ItemId) -> StoreResult<usize> {
        self.saved
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| StoreError::SavedItemNotFound(id.clone()))
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Flips selection of a line; unknown ids are ignored.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        let selected = self.cart.toggle(id);
        debug!(id = %id, selected, "Toggled selection");
        selected
    }

    pub fn select_all(&mut self) {
        self.cart.select_all();
    }

    /// The "select all" checkbox.
    pub fn toggle_all(&mut self) {
        self.cart.toggle_all();
        debug!(selected = self.cart.selection().len(), "Toggled select all");
    }

    pub fn clear_selection(&mut self) {
        self.cart.clear_selection();
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.cart.is_selected(id)
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// Updates the coupon input text. Refused while a coupon is active.
    pub fn enter_coupon_code(&mut self, text: &str) -> StoreResult<()> {
        self.coupon.enter(text)?;
        Ok(())
    }

    /// Applies the code currently in the coupon input.
    pub fn apply_coupon(&mut self) -> StoreResult<AppliedCoupon> {
        let code = self.coupon.entered_code().to_string();
        self.apply_coupon_code(&code)
    }

    /// Applies `code` against the selected subtotal.
    ///
    /// ## User Workflow
    /// ```text
    /// "artisan20" ──► apply_coupon_code()
    ///      │
    ///      ├── coupon already active ──► AlreadyActive (remove first)
    ///      ├── not in table ───────────► UnknownCode
    ///      ├── subtotal < minimum ─────► MinimumNotMet { minimum, shortfall }
    ///      └── OK ─────────────────────► "Coupon applied! You saved ₹5,000.00"
    /// ```
    pub fn apply_coupon_code(&mut self, code: &str) -> StoreResult<AppliedCoupon> {
        let subtotal = self.cart.selected_subtotal();

        match self.coupon.apply(&self.coupons, code, subtotal) {
            Ok(applied) => {
                info!(code = %applied.code, discount = %applied.discount, "Coupon applied");
                Ok(applied)
            }
            Err(err) => {
                debug!(code = %code, %subtotal, error = %err, "Coupon refused");
                Err(CoreError::from(err).into())
            }
        }
    }

    /// Clears the active coupon and the coupon input.
    pub fn remove_coupon(&mut self) -> Option<CouponRule> {
        let removed = self.coupon.remove();
        if let Some(rule) = &removed {
            info!(code = %rule.code, "Coupon removed");
        }
        removed
    }

    // =========================================================================
    // Summary & Checkout
    // =========================================================================

    /// The order summary for the current selection and coupon.
    pub fn breakdown(&self) -> PriceBreakdown {
        compute_breakdown(
            self.cart.items(),
            self.cart.selection(),
            self.coupon.active(),
            &self.pricing,
        )
    }

    /// Prepares the hand-off to the checkout screen.
    pub fn checkout(&self) -> StoreResult<CheckoutHandoff> {
        let selected: Vec<CartItem> = self.cart.selected_items().cloned().collect();
        let handoff = CheckoutHandoff::prepare(selected, self.breakdown())?;

        info!(
            reference = %handoff.reference,
            items = handoff.items.len(),
            total = %handoff.total(),
            "Checkout prepared"
        );
        Ok(handoff)
    }

    /// Removes the purchased lines and clears the coupon after a successful
    /// checkout. Returns the removed lines.
    pub fn complete_checkout(&mut self, handoff: &CheckoutHandoff) -> Vec<CartItem> {
        let removed = self.cart.remove_items(&handoff.item_ids());
        self.coupon.remove();

        info!(
            reference = %handoff.reference,
            removed = removed.len(),
            remaining = self.cart.item_count(),
            "Checkout completed"
        );
        removed
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(PricingConfig::default(), CouponBook::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
