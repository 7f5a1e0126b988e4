//! # Cart
//!
//! The list of cart lines together with the selection over them.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront Action        Cart Operation          State Change          │
//! │  ─────────────────        ──────────────          ────────────          │
//! │  Add to cart ───────────► add_item() ───────────► push + select        │
//! │  Quantity stepper ──────► update_quantity() ────► items[i].qty = n     │
//! │  Remove ────────────────► remove_item() ────────► remove + deselect    │
//! │  Line checkbox ─────────► toggle() ─────────────► flip membership      │
//! │  "Select all" ──────────► toggle_all() ─────────► all / none           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Line ids are unique
//! - Every selected id belongs to a line in the cart
//! - Every quantity is in `1..=MAX_ITEM_QUANTITY`

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::selection::SelectionSet;
use crate::types::{CartItem, ItemId};
use crate::validation::{validate_cart_item, validate_cart_size, validate_quantity};
use crate::MAX_CART_ITEMS;

/// Cart lines plus the checkout selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
    selection: SelectionSet,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn get(&self, id: &ItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Adds a line and selects it.
    ///
    /// ## Errors
    /// - `Validation` if the line fails validation
    /// - `DuplicateItem` if a line with the same id exists
    /// - `CartTooLarge` at 100 lines
    pub fn add_item(&mut self, item: CartItem) -> CoreResult<()> {
        validate_cart_item(&item)?;

        if self.contains(&item.id) {
            return Err(CoreError::DuplicateItem(item.id));
        }

        validate_cart_size(self.items.len())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_ITEMS })?;

        self.selection.select(&item.id);
        self.items.push(item);
        Ok(())
    }

    /// Sets the quantity of a line. Out-of-range quantities change nothing.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: u32) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.clone()))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Removes a line and its selection.
    pub fn remove_item(&mut self, id: &ItemId) -> CoreResult<CartItem> {
        let index = self
            .items
            .iter()
            .position(|i| &i.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.clone()))?;

        self.selection.deselect(id);
        Ok(self.items.remove(index))
    }

    /// Removes every listed line that is present, returning the removed lines.
    pub fn remove_items(&mut self, ids: &[ItemId]) -> Vec<CartItem> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|i| ids.contains(&i.id));
        self.items = kept;

        let items = &self.items;
        self.selection
            .retain_existing(|id| items.iter().any(|i| &i.id == id));
        removed
    }

    /// Empties the cart and the selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selection.clear();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Flips selection of a line. Unknown ids are a no-op returning `false`.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selection.toggle(id)
    }

    /// Selects every line.
    pub fn select_all(&mut self) {
        self.selection.select_all(self.items.iter().map(|i| &i.id));
    }

    /// Deselects every line.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The "select all" checkbox: clears when everything is selected,
    /// otherwise selects everything.
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.clear_selection();
        } else {
            self.select_all();
        }
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selection.is_selected(id)
    }

    /// True when the cart is non-empty and every line is selected.
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.selection.len() == self.items.len()
    }

    /// Selected lines in cart order.
    pub fn selected_items(&self) -> impl Iterator<Item = &CartItem> {
        self.items
            .iter()
            .filter(move |i| self.selection.is_selected(&i.id))
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals over the selection.
    pub fn selected_subtotal(&self) -> Money {
        self.selected_items().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn item(id: &str, rupees: i64) -> CartItem {
        CartItem::new(id, format!("Item {}", id), Money::from_rupees(rupees))
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(item("saree", 12_500)).unwrap();
        cart.add_item(item("painting", 8_500).with_quantity(2)).unwrap();
        cart.add_item(item("pottery", 3_200)).unwrap();
        cart
    }

    #[test]
    fn test_added_items_start_selected() {
        let cart = sample_cart();
        assert_eq!(cart.item_count(), 3);
        assert!(cart.all_selected());
        assert_eq!(cart.selected_subtotal(), Money::from_rupees(32_700));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut cart = sample_cart();
        let err = cart.add_item(item("saree", 1)).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateItem(_)));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = sample_cart();
        let id = ItemId::new("pottery");

        cart.update_quantity(&id, 3).unwrap();
        assert_eq!(cart.get(&id).map(|i| i.quantity), Some(3));

        let err = cart.update_quantity(&id, 0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(cart.get(&id).map(|i| i.quantity), Some(3));

        assert!(matches!(
            cart.update_quantity(&ItemId::new("missing"), 2),
            Err(CoreError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_remove_item_drops_selection() {
        let mut cart = sample_cart();
        let id = ItemId::new("saree");

        let removed = cart.remove_item(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(!cart.is_selected(&id));
        assert!(cart.selection().iter().all(|s| cart.contains(s)));
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let mut cart = sample_cart();
        let before = cart.selection().clone();
        assert!(!cart.toggle(&ItemId::new("ghost")));
        assert_eq!(cart.selection(), &before);
    }

    #[test]
    fn test_toggle_all() {
        let mut cart = sample_cart();
        cart.toggle_all();
        assert!(cart.selection().is_empty());

        cart.toggle(&ItemId::new("saree"));
        cart.toggle_all();
        assert!(cart.all_selected());
    }

    #[test]
    fn test_remove_items() {
        let mut cart = sample_cart();
        let removed = cart.remove_items(&[ItemId::new("saree"), ItemId::new("ghost")]);
        assert_eq!(removed.len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.selection().len(), 2);
    }

    #[test]
    fn test_total_quantity() {
        assert_eq!(sample_cart().total_quantity(), 4);
    }
}
