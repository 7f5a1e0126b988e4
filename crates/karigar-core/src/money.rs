//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    12500 * 0.18 = 2250.0000000000005  ❌ WRONG!                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    1_250_000 paise * 1800 bps / 10_000 = 225_000 paise                  │
//! │    Percentages are rounded half-up to the nearest paisa, once.         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Arithmetic saturates at the `i64` bounds instead of wrapping; cart
//! validation keeps real amounts far below them.
//!
//! ## Usage
//! ```rust
//! use karigar_core::money::Money;
//!
//! let price = Money::from_rupees(12_500);
//! let line = price * 2u32;
//! assert_eq!(line, Money::from_rupees(25_000));
//! assert_eq!(line.to_string(), "₹25,000.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

/// Paise per rupee.
pub const PAISE_PER_RUPEE: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount stored in paise (1/100 INR).
///
/// ## Where Money is Used
/// ```text
/// CartItem.price ──► line_total ──► PriceBreakdown.subtotal
///                                         │
///             CouponRule.max_discount ────┼──► discount
///             PricingConfig.shipping_fee ─┼──► shipping
///             PricingConfig.tax_rate ─────┴──► tax ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ```rust
    /// use karigar_core::money::Money;
    ///
    /// let price = Money::from_paise(1_250_050); // ₹12,500.50
    /// assert_eq!(price.paise(), 1_250_050);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ```rust
    /// use karigar_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(200).paise(), 20_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * PAISE_PER_RUPEE)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / PAISE_PER_RUPEE
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % PAISE_PER_RUPEE).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtraction that stops at zero.
    ///
    /// Used for "amount still needed" figures, which never go negative.
    ///
    /// ```rust
    /// use karigar_core::money::Money;
    ///
    /// let needed = Money::from_rupees(10_000).saturating_sub(Money::from_rupees(12_000));
    /// assert!(needed.is_zero());
    /// ```
    #[inline]
    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }

    /// Applies a percentage rate, rounding half-up to the nearest paisa.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 is the 0.5
    /// that turns truncation into rounding. `i128` keeps large carts from
    /// overflowing the intermediate product.
    ///
    /// ```rust
    /// use karigar_core::money::Money;
    /// use karigar_core::types::Rate;
    ///
    /// let subtotal = Money::from_rupees(12_500);
    /// let gst = subtotal.apply_rate(Rate::from_bps(1800)); // 18%
    /// assert_eq!(gst, Money::from_rupees(2_250));
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(paise.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ```rust
    /// use karigar_core::money::Money;
    ///
    /// let unit_price = Money::from_rupees(8_500);
    /// assert_eq!(unit_price.multiply_quantity(2), Money::from_rupees(17_000));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `₹1,25,000.50` using Indian digit grouping.
///
/// ## Note
/// This is for logs and the demo binary. The storefront formats its own
/// amounts for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            group_indian(self.rupees().unsigned_abs()),
            self.paise_part()
        )
    }
}

/// Groups digits as lakh/crore: the last three digits, then pairs.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(12_500);
        assert_eq!(money.paise(), 1_250_000);
        assert_eq!(money.rupees(), 12_500);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Money::from_rupees(200).to_string(), "₹200.00");
        assert_eq!(Money::from_rupees(9_000).to_string(), "₹9,000.00");
        assert_eq!(Money::from_rupees(12_500).to_string(), "₹12,500.00");
        assert_eq!(Money::from_rupees(125_000).to_string(), "₹1,25,000.00");
        assert_eq!(Money::from_rupees(12_345_678).to_string(), "₹1,23,45,678.00");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(1000);
        let b = Money::from_rupees(500);

        assert_eq!(a + b, Money::from_rupees(1500));
        assert_eq!(a - b, Money::from_rupees(500));
        assert_eq!(a * 3u32, Money::from_rupees(3000));
    }

    #[test]
    fn test_apply_rate_exact() {
        let subtotal = Money::from_rupees(25_000);
        assert_eq!(subtotal.apply_rate(Rate::from_bps(2000)), Money::from_rupees(5_000));
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // 10% of 3.35 rupees = 33.5 paise → 34 paise
        let amount = Money::from_paise(335);
        assert_eq!(amount.apply_rate(Rate::from_bps(1000)).paise(), 34);

        // 10% of 3.34 rupees = 33.4 paise → 33 paise
        let amount = Money::from_paise(334);
        assert_eq!(amount.apply_rate(Rate::from_bps(1000)).paise(), 33);
    }

    #[test]
    fn test_saturating_sub() {
        let a = Money::from_rupees(100);
        assert_eq!(a.saturating_sub(Money::from_rupees(40)), Money::from_rupees(60));
        assert_eq!(a.saturating_sub(Money::from_rupees(400)), Money::zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_paise(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(3), Money::from_paise(i64::MAX));
        assert_eq!(huge + huge + huge, Money::from_paise(i64::MAX));
        assert_eq!(Money::from_paise(i64::MIN) - huge, Money::from_paise(i64::MIN));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_rupees(1), Money::from_rupees(2)].iter().sum();
        assert_eq!(total, Money::from_rupees(3));
    }
}
