//! # Checkout Hand-off
//!
//! The immutable record passed to the checkout screen when the shopper
//! proceeds. No payment happens here.
//!
//! ## Lifecycle
//! ```text
//! ┌──────────┐  checkout()   ┌──────────────────┐  complete_checkout()  ┌─────────────┐
//! │   Cart   │ ────────────► │ CheckoutHandoff  │ ────────────────────► │ Cart without│
//! │ selected │               │ items+breakdown  │                       │ bought lines│
//! └──────────┘               └──────────────────┘                       └─────────────┘
//!      │ nothing selected → EmptySelection
//!      │ selected line out of stock → OutOfStock
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use karigar_core::{CartItem, ItemId, Money, PriceBreakdown};

use crate::error::{StoreError, StoreResult};

/// What the checkout screen receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutHandoff {
    /// Reference shown on the order confirmation screen.
    #[ts(as = "String")]
    pub reference: Uuid,
    /// Snapshot of the selected lines.
    pub items: Vec<CartItem>,
    pub breakdown: PriceBreakdown,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl CheckoutHandoff {
    /// Builds the hand-off from the selected lines.
    ///
    /// ## Errors
    /// - `EmptySelection` when `selected` is empty
    /// - `OutOfStock` for the first selected line that is out of stock
    pub fn prepare(selected: Vec<CartItem>, breakdown: PriceBreakdown) -> StoreResult<Self> {
        if selected.is_empty() {
            return Err(StoreError::EmptySelection);
        }

        if let Some(item) = selected.iter().find(|i| !i.in_stock) {
            return Err(StoreError::OutOfStock {
                id: item.id.clone(),
                name: item.name.clone(),
            });
        }

        Ok(CheckoutHandoff {
            reference: Uuid::new_v4(),
            items: selected,
            breakdown,
            created_at: Utc::now(),
        })
    }

    /// Amount the shopper will be asked to pay.
    pub fn total(&self) -> Money {
        self.breakdown.total
    }

    /// Ids of the purchased lines.
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }
}
