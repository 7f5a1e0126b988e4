//! # Price Aggregator
//!
//! Derives the order summary from cart lines, the selection and the coupon.
//!
//! ## Breakdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = Σ price × quantity            (selected lines only)         │
//! │  discount = coupon.discount_for(subtotal) (0 without a coupon)          │
//! │  shipping = 0 if subtotal > threshold, else flat fee                    │
//! │  tax      = subtotal × tax rate           (on the pre-discount amount)  │
//! │  total    = subtotal − discount + shipping + tax                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The breakdown is never stored. It is recomputed after every cart,
//! selection or coupon change, so it cannot drift from its inputs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::CouponRule;
use crate::money::Money;
use crate::selection::SelectionSet;
use crate::types::{CartItem, Rate};

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Tax and shipping constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingConfig {
    /// Applied to the selected subtotal (GST).
    pub tax_rate: Rate,
    /// Shipping is free when the subtotal is strictly above this.
    pub free_shipping_threshold: Money,
    /// Flat fee charged at or below the threshold.
    pub shipping_fee: Money,
}

impl PricingConfig {
    /// Shipping charge for `subtotal`.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.shipping_fee
        }
    }

    /// Tax charged on `subtotal`.
    pub fn tax_for(&self, subtotal: Money) -> Money {
        subtotal.apply_rate(self.tax_rate)
    }
}

/// 18% GST, free shipping above ₹10,000, ₹200 otherwise.
impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tax_rate: Rate::from_percent(18),
            free_shipping_threshold: Money::from_rupees(10_000),
            shipping_fee: Money::from_rupees(200),
        }
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// The order summary shown next to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    /// Number of selected lines.
    pub selected_lines: usize,
    /// Number of selected units (sum of quantities).
    pub selected_units: u64,
    pub subtotal: Money,
    pub discount: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
    /// Savings against original prices over the selection.
    pub savings: Money,
    /// Code of the active coupon, if any.
    pub coupon_code: Option<String>,
    /// False when a coupon is active but the subtotal fell below its minimum.
    pub coupon_qualifies: bool,
    /// Amount to add for free shipping; `None` once shipping is free.
    pub free_shipping_shortfall: Option<Money>,
}

impl PriceBreakdown {
    /// Whether the selection is empty (checkout must be blocked).
    pub fn is_empty(&self) -> bool {
        self.selected_lines == 0
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Computes the breakdown for the selected lines.
///
/// Pure and deterministic: same inputs, same output. Ids in `selection`
/// that match no line are ignored.
///
/// ```rust
/// use karigar_core::money::Money;
/// use karigar_core::pricing::{compute_breakdown, PricingConfig};
/// use karigar_core::selection::SelectionSet;
/// use karigar_core::types::CartItem;
///
/// let items = vec![CartItem::new("pot", "Terracotta Set", Money::from_rupees(9_000))];
/// let mut selection = SelectionSet::new();
/// selection.select(&items[0].id);
///
/// let b = compute_breakdown(&items, &selection, None, &PricingConfig::default());
/// assert_eq!(b.shipping, Money::from_rupees(200));
/// assert_eq!(b.tax, Money::from_rupees(1_620));
/// assert_eq!(b.total, Money::from_rupees(10_820));
/// ```
pub fn compute_breakdown(
    items: &[CartItem],
    selection: &SelectionSet,
    coupon: Option<&CouponRule>,
    config: &PricingConfig,
) -> PriceBreakdown {
    let selected: Vec<&CartItem> = items
        .iter()
        .filter(|i| selection.is_selected(&i.id))
        .collect();

    let subtotal: Money = selected.iter().map(|i| i.line_total()).sum();
    let savings: Money = selected.iter().map(|i| i.line_savings()).sum();

    let discount = coupon
        .map(|rule| rule.discount_for(subtotal))
        .unwrap_or_default();
    let shipping = config.shipping_for(subtotal);
    let tax = config.tax_for(subtotal);
    let total = subtotal - discount + shipping + tax;

    let free_shipping_shortfall = if shipping.is_zero() {
        None
    } else {
        // Strictly above the threshold, so one paisa more than the gap.
        Some(config.free_shipping_threshold.saturating_sub(subtotal) + Money::from_paise(1))
    };

    PriceBreakdown {
        selected_lines: selected.len(),
        selected_units: selected.iter().map(|i| u64::from(i.quantity)).sum(),
        subtotal,
        discount,
        shipping,
        tax,
        total,
        savings,
        coupon_code: coupon.map(|rule| rule.code.clone()),
        coupon_qualifies: coupon.map_or(true, |rule| rule.qualifies(subtotal)),
        free_shipping_shortfall,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupon::CouponBook;

    fn line(id: &str, rupees: i64, qty: u32) -> CartItem {
        CartItem::new(id, id, Money::from_rupees(rupees)).with_quantity(qty)
    }

    fn select_all(items: &[CartItem]) -> SelectionSet {
        let mut selection = SelectionSet::new();
        selection.select_all(items.iter().map(|i| &i.id));
        selection
    }

    #[test]
    fn test_shipping_threshold_is_strict() {
        let config = PricingConfig::default();
        assert_eq!(config.shipping_for(Money::from_rupees(9_000)), Money::from_rupees(200));
        assert_eq!(config.shipping_for(Money::from_rupees(10_000)), Money::from_rupees(200));
        assert_eq!(config.shipping_for(Money::from_rupees(10_001)), Money::zero());
    }

    #[test]
    fn test_breakdown_with_coupon() {
        let items = vec![line("saree", 12_500, 1)];
        let book = CouponBook::default();
        let b = compute_breakdown(
            &items,
            &select_all(&items),
            book.get("WELCOME10"),
            &PricingConfig::default(),
        );

        assert_eq!(b.subtotal, Money::from_rupees(12_500));
        assert_eq!(b.discount, Money::from_rupees(1_250));
        assert_eq!(b.shipping, Money::zero());
        assert_eq!(b.tax, Money::from_rupees(2_250));
        assert_eq!(b.total, Money::from_rupees(13_500));
        assert_eq!(b.coupon_code.as_deref(), Some("WELCOME10"));
        assert!(b.coupon_qualifies);
        assert_eq!(b.free_shipping_shortfall, None);
    }

    #[test]
    fn test_only_selected_lines_count() {
        let items = vec![line("saree", 12_500, 1), line("painting", 8_500, 2)];
        let mut selection = SelectionSet::new();
        selection.select(&items[1].id);

        let b = compute_breakdown(&items, &selection, None, &PricingConfig::default());
        assert_eq!(b.selected_lines, 1);
        assert_eq!(b.selected_units, 2);
        assert_eq!(b.subtotal, Money::from_rupees(17_000));
    }

    #[test]
    fn test_empty_selection() {
        let items = vec![line("saree", 12_500, 1)];
        let b = compute_breakdown(&items, &SelectionSet::new(), None, &PricingConfig::default());

        assert!(b.is_empty());
        assert!(b.subtotal.is_zero());
        assert!(b.tax.is_zero());
        assert_eq!(b.shipping, Money::from_rupees(200));
        assert_eq!(b.total, Money::from_rupees(200));
    }

    #[test]
    fn test_coupon_below_minimum_after_selection_change() {
        let items = vec![line("pottery", 3_200, 1)];
        let book = CouponBook::default();
        let b = compute_breakdown(
            &items,
            &select_all(&items),
            book.get("ARTISAN20"),
            &PricingConfig::default(),
        );

        assert!(b.discount.is_zero());
        assert!(!b.coupon_qualifies);
    }

    #[test]
    fn test_free_shipping_shortfall() {
        let items = vec![line("pottery", 9_000, 1)];
        let b = compute_breakdown(&items, &select_all(&items), None, &PricingConfig::default());
        assert_eq!(
            b.free_shipping_shortfall,
            Some(Money::from_rupees(1_000) + Money::from_paise(1))
        );
    }

    #[test]
    fn test_shortfall_at_exact_threshold() {
        // ₹10,000 is not above the threshold: still charged, one paisa short.
        let items = vec![line("saree", 10_000, 1)];
        let b = compute_breakdown(&items, &select_all(&items), None, &PricingConfig::default());
        assert_eq!(b.shipping, Money::from_rupees(200));
        assert_eq!(b.free_shipping_shortfall, Some(Money::from_paise(1)));

        let items = vec![
            line("saree", 10_000, 1),
            CartItem::new("diya", "diya", Money::from_paise(1)),
        ];
        let b = compute_breakdown(&items, &select_all(&items), None, &PricingConfig::default());
        assert!(b.has_free_shipping());
        assert_eq!(b.free_shipping_shortfall, None);
    }

    #[test]
    fn test_savings_over_selection() {
        let items = vec![line("painting", 8_500, 2).with_original_price(Money::from_rupees(10_000))];
        let b = compute_breakdown(&items, &select_all(&items), None, &PricingConfig::default());
        assert_eq!(b.savings, Money::from_rupees(3_000));
    }

    #[test]
    fn test_deterministic() {
        let items = vec![line("saree", 12_500, 1), line("pottery", 3_200, 3)];
        let selection = select_all(&items);
        let config = PricingConfig::default();
        let book = CouponBook::default();

        let a = compute_breakdown(&items, &selection, book.get("CRAFT25"), &config);
        let b = compute_breakdown(&items, &selection, book.get("CRAFT25"), &config);
        assert_eq!(a, b);
    }
}
