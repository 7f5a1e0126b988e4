//! # Coupon Module
//!
//! Coupon rules, the coupon table, and the single active-coupon slot.
//!
//! ## Discount Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal < min_purchase      → refused (MinimumNotMet)                 │
//! │  subtotal ≥ min_purchase      → discount = min(subtotal × rate, cap)    │
//! │                                                                         │
//! │  ARTISAN20 (20%, min ₹10,000, cap ₹5,000)                               │
//! │    ₹25,000 → ₹5,000     ₹30,000 → ₹5,000 (cap binds, not ₹6,000)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::error::CouponError;
use crate::money::Money;
use crate::types::Rate;
use crate::error::ValidationError;
use crate::validation::{normalize_coupon_code, validate_price, validate_rate_bps};

// =============================================================================
// Coupon Rule
// =============================================================================

/// A named percentage discount with a minimum purchase and a cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CouponRule {
    /// Upper-case code, e.g. `WELCOME10`.
    pub code: String,
    pub rate: Rate,
    /// Smallest selected subtotal the coupon accepts (inclusive).
    pub min_purchase: Money,
    /// Largest discount the coupon can ever produce.
    pub max_discount: Money,
}

impl CouponRule {
    /// Creates a rule without checking it; the code is stored upper-case.
    ///
    /// For trusted tables such as the built-in defaults. Rules from any
    /// other source go through [`CouponRule::try_new`].
    pub fn new(code: &str, rate: Rate, min_purchase: Money, max_discount: Money) -> Self {
        CouponRule {
            code: code.trim().to_ascii_uppercase(),
            rate,
            min_purchase,
            max_discount,
        }
    }

    /// Creates a validated rule.
    ///
    /// ```rust
    /// use karigar_core::coupon::CouponRule;
    /// use karigar_core::money::Money;
    /// use karigar_core::types::Rate;
    ///
    /// let ok = CouponRule::try_new("diwali15", Rate::from_percent(15), Money::zero(), Money::from_rupees(1_500));
    /// assert_eq!(ok.unwrap().code, "DIWALI15");
    ///
    /// let too_generous = CouponRule::try_new("FREE", Rate::from_bps(15_000), Money::zero(), Money::zero());
    /// assert!(too_generous.is_err());
    /// ```
    pub fn try_new(
        code: &str,
        rate: Rate,
        min_purchase: Money,
        max_discount: Money,
    ) -> Result<Self, ValidationError> {
        let rule = Self::new(code, rate, min_purchase, max_discount);
        rule.validate()?;
        Ok(rule)
    }

    /// Checks the code format, a rate of at most 100%, and non-negative
    /// minimum and cap.
    pub fn validate(&self) -> Result<(), ValidationError> {
        normalize_coupon_code(&self.code)?;
        validate_rate_bps("coupon rate", self.rate.bps())?;
        validate_price("minimum purchase", self.min_purchase)?;
        validate_price("maximum discount", self.max_discount)?;
        Ok(())
    }

    /// Whether `subtotal` meets the minimum purchase.
    #[inline]
    pub fn qualifies(&self, subtotal: Money) -> bool {
        subtotal >= self.min_purchase
    }

    /// `min(subtotal × rate, cap)`, ignoring the minimum purchase. Never
    /// negative and never more than `subtotal`, even for an unchecked rule.
    ///
    /// ```rust
    /// use karigar_core::coupon::CouponRule;
    /// use karigar_core::money::Money;
    /// use karigar_core::types::Rate;
    ///
    /// let rule = CouponRule::new(
    ///     "ARTISAN20",
    ///     Rate::from_percent(20),
    ///     Money::from_rupees(10_000),
    ///     Money::from_rupees(5_000),
    /// );
    /// assert_eq!(rule.capped_discount(Money::from_rupees(30_000)), Money::from_rupees(5_000));
    /// ```
    pub fn capped_discount(&self, subtotal: Money) -> Money {
        subtotal
            .apply_rate(self.rate)
            .min(self.max_discount)
            .min(subtotal)
            .max(Money::zero())
    }

    /// Discount this rule yields for `subtotal`: zero below the minimum.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        if self.qualifies(subtotal) {
            self.capped_discount(subtotal)
        } else {
            Money::zero()
        }
    }

    /// Checks the rule against `subtotal`, producing the applied result.
    pub fn evaluate(&self, subtotal: Money) -> Result<AppliedCoupon, CouponError> {
        if !self.qualifies(subtotal) {
            return Err(CouponError::MinimumNotMet {
                code: self.code.clone(),
                minimum: self.min_purchase,
                shortfall: self.min_purchase - subtotal,
            });
        }

        Ok(AppliedCoupon {
            code: self.code.clone(),
            rate: self.rate,
            discount: self.capped_discount(subtotal),
        })
    }
}

/// Result of a successful coupon application.
///
/// `discount` is the saving at the moment of application, used for the
/// "You saved ..." message. The price breakdown recomputes it on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppliedCoupon {
    pub code: String,
    pub rate: Rate,
    pub discount: Money,
}

// =============================================================================
// Coupon Book
// =============================================================================

/// The fixed table of coupon rules, keyed by upper-case code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponBook {
    rules: BTreeMap<String, CouponRule>,
}

impl CouponBook {
    /// Creates an empty table.
    pub fn empty() -> Self {
        CouponBook {
            rules: BTreeMap::new(),
        }
    }

    /// Builds a table from rules. A later rule replaces an earlier one with
    /// the same code. Rules are taken as given; see [`CouponRule::validate`].
    pub fn from_rules(rules: impl IntoIterator<Item = CouponRule>) -> Self {
        let mut book = Self::empty();
        for rule in rules {
            book.insert(rule);
        }
        book
    }

    /// Adds or replaces a rule.
    pub fn insert(&mut self, rule: CouponRule) {
        self.rules.insert(rule.code.clone(), rule);
    }

    /// Looks up a code case-insensitively.
    pub fn get(&self, code: &str) -> Option<&CouponRule> {
        self.rules.get(&code.trim().to_ascii_uppercase())
    }

    /// Rules in code order.
    pub fn rules(&self) -> impl Iterator<Item = &CouponRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Looks up `code` and checks it against `subtotal`.
    ///
    /// ```rust
    /// use karigar_core::coupon::CouponBook;
    /// use karigar_core::money::Money;
    ///
    /// let book = CouponBook::default();
    /// let applied = book.evaluate("welcome10", Money::from_rupees(12_500)).unwrap();
    /// assert_eq!(applied.code, "WELCOME10");
    /// assert_eq!(applied.discount, Money::from_rupees(1_250));
    /// ```
    pub fn evaluate(&self, code: &str, subtotal: Money) -> Result<AppliedCoupon, CouponError> {
        let normalized = normalize_coupon_code(code).map_err(|_| CouponError::UnknownCode {
            code: code.trim().to_string(),
        })?;

        let rule = self
            .rules
            .get(&normalized)
            .ok_or(CouponError::UnknownCode { code: normalized })?;

        rule.evaluate(subtotal)
    }
}

/// The storefront's launch coupons.
impl Default for CouponBook {
    fn default() -> Self {
        CouponBook::from_rules([
            CouponRule::new(
                "WELCOME10",
                Rate::from_percent(10),
                Money::zero(),
                Money::from_rupees(2_000),
            ),
            CouponRule::new(
                "ARTISAN20",
                Rate::from_percent(20),
                Money::from_rupees(10_000),
                Money::from_rupees(5_000),
            ),
            CouponRule::new(
                "CRAFT25",
                Rate::from_percent(25),
                Money::from_rupees(15_000),
                Money::from_rupees(7_500),
            ),
            CouponRule::new(
                "FESTIVE30",
                Rate::from_percent(30),
                Money::from_rupees(20_000),
                Money::from_rupees(10_000),
            ),
        ])
    }
}

// =============================================================================
// Coupon Slot
// =============================================================================

/// The coupon input box and the one active coupon.
///
/// ## States
/// ```text
///   ┌────────────┐  apply(ok)   ┌────────────┐
///   │  No coupon │ ───────────► │   Active   │
///   │ (editable) │ ◄─────────── │  (locked)  │
///   └────────────┘   remove()   └────────────┘
///        │  apply(err): unchanged      │ apply / enter: AlreadyActive
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponSlot {
    entered_code: String,
    active: Option<CouponRule>,
}

impl CouponSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text currently in the coupon input.
    pub fn entered_code(&self) -> &str {
        &self.entered_code
    }

    /// The active coupon rule, if any.
    pub fn active(&self) -> Option<&CouponRule> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Updates the input text. Refused while a coupon is active.
    pub fn enter(&mut self, text: &str) -> Result<(), CouponError> {
        self.ensure_inactive()?;
        self.entered_code = text.to_string();
        Ok(())
    }

    /// Applies `code` against `subtotal`. On failure nothing changes.
    pub fn apply(
        &mut self,
        book: &CouponBook,
        code: &str,
        subtotal: Money,
    ) -> Result<AppliedCoupon, CouponError> {
        self.ensure_inactive()?;

        let applied = book.evaluate(code, subtotal)?;
        self.active = book.get(&applied.code).cloned();
        self.entered_code = applied.code.clone();
        Ok(applied)
    }

    /// Clears the active coupon and the entered code.
    pub fn remove(&mut self) -> Option<CouponRule> {
        self.entered_code.clear();
        self.active.take()
    }

    fn ensure_inactive(&self) -> Result<(), CouponError> {
        match &self.active {
            Some(rule) => Err(CouponError::AlreadyActive {
                active: rule.code.clone(),
            }),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
