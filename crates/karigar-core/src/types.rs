//! # Domain Types
//!
//! Core domain types used throughout the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartItem     │   │     Variant     │   │  Customization  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  color          │   │  Color(..)      │       │
//! │  │  price (Money)  │   │  size           │   │  Pattern(..)    │       │
//! │  │  quantity (≥1)  │   └─────────────────┘   │  Material(..)   │       │
//! │  │  seller         │                         │  Size(..)       │       │
//! │  └─────────────────┘   ┌─────────────────┐   │  Embroidery(..) │       │
//! │                        │      Rate       │   └─────────────────┘       │
//! │                        │  bps (u32)      │                              │
//! │                        │  1800 = 18%     │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_customization;

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (GST), 2000 bps = 20% (ARTISAN20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a whole percentage.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        Rate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Item Identity
// =============================================================================

/// Identifier of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps an existing identifier (e.g. a product id from the storefront).
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(id)
    }
}

// =============================================================================
// Variant & Customization
// =============================================================================

/// The product variant chosen when the item was added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Variant {
    pub color: Option<String>,
    pub size: Option<String>,
}

impl Variant {
    pub fn new(color: impl Into<String>, size: impl Into<String>) -> Self {
        Variant {
            color: Some(color.into()),
            size: Some(size.into()),
        }
    }
}

/// A customization selected in the studio, one variant per category.
///
/// Serialized as `{ "type": "pattern", "value": "Traditional Zari" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum Customization {
    Color(String),
    Pattern(String),
    Material(String),
    Size(String),
    Embroidery(String),
}

impl Customization {
    /// Parses a loosely typed `(type, value)` pair coming from the storefront.
    ///
    /// ## Rules
    /// - Category is matched case-insensitively, singular or plural
    /// - Value is trimmed, must be non-empty and at most 60 characters
    ///
    /// ```rust
    /// use karigar_core::types::Customization;
    ///
    /// let c = Customization::parse("Embroidery", " Gold Thread ").unwrap();
    /// assert_eq!(c, Customization::Embroidery("Gold Thread".to_string()));
    /// assert!(Customization::parse("Glitter", "lots").is_err());
    /// ```
    pub fn parse(kind: &str, value: &str) -> Result<Self, ValidationError> {
        let value = value.trim().to_string();
        let customization = match kind.trim().to_lowercase().as_str() {
            "color" | "colors" | "colour" => Customization::Color(value),
            "pattern" | "patterns" => Customization::Pattern(value),
            "material" | "materials" => Customization::Material(value),
            "size" | "sizes" => Customization::Size(value),
            "embroidery" => Customization::Embroidery(value),
            _ => {
                return Err(ValidationError::NotAllowed {
                    field: "customization type".to_string(),
                    allowed: Self::CATEGORIES.iter().map(|c| c.to_string()).collect(),
                })
            }
        };

        validate_customization(&customization)?;
        Ok(customization)
    }

    /// Category names in display order.
    pub const CATEGORIES: [&'static str; 5] = ["Color", "Pattern", "Material", "Size", "Embroidery"];

    /// Display name of the category.
    pub fn category(&self) -> &'static str {
        match self {
            Customization::Color(_) => "Color",
            Customization::Pattern(_) => "Pattern",
            Customization::Material(_) => "Material",
            Customization::Size(_) => "Size",
            Customization::Embroidery(_) => "Embroidery",
        }
    }

    /// The selected value.
    pub fn value(&self) -> &str {
        match self {
            Customization::Color(v)
            | Customization::Pattern(v)
            | Customization::Material(v)
            | Customization::Size(v)
            | Customization::Embroidery(v) => v,
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the shopping cart.
///
/// ## Design Notes
/// - `price` is the selling price, `original_price` the pre-discount list price
///   shown struck through. Both are frozen when the item is added.
/// - `quantity` is always at least 1; the store refuses anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    pub original_price: Money,
    pub quantity: u32,
    pub variant: Variant,
    pub personalization: Option<String>,
    pub customizations: Vec<Customization>,
    /// Display name of the artisan or workshop selling the item.
    pub seller: String,
    /// Free-form delivery window, e.g. "10-15 days".
    pub delivery_estimate: Option<String>,
    pub in_stock: bool,
    pub customizable: bool,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates an in-stock, non-customizable line with quantity 1.
    ///
    /// ```rust
    /// use karigar_core::money::Money;
    /// use karigar_core::types::CartItem;
    ///
    /// let item = CartItem::new("saree-1", "Banarasi Silk Saree", Money::from_rupees(12_500))
    ///     .with_quantity(2);
    /// assert_eq!(item.line_total(), Money::from_rupees(25_000));
    /// ```
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Money) -> Self {
        CartItem {
            id: id.into(),
            name: name.into(),
            price,
            original_price: price,
            quantity: 1,
            variant: Variant::default(),
            personalization: None,
            customizations: Vec::new(),
            seller: String::new(),
            delivery_estimate: None,
            in_stock: true,
            customizable: false,
            added_at: Utc::now(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = original_price;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the personalization note. Blank text is stored as `None`.
    pub fn with_personalization(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.personalization = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    /// Adds a customization and marks the item customizable.
    pub fn with_customization(mut self, customization: Customization) -> Self {
        self.customizations.push(customization);
        self.customizable = true;
        self
    }

    pub fn with_seller(mut self, seller: impl Into<String>) -> Self {
        self.seller = seller.into();
        self
    }

    pub fn with_delivery_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.delivery_estimate = Some(estimate.into());
        self
    }

    pub fn customizable(mut self, customizable: bool) -> Self {
        self.customizable = customizable;
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }

    /// Amount saved against the original price for the whole line.
    pub fn line_savings(&self) -> Money {
        if self.original_price > self.price {
            (self.original_price - self.price) * self.quantity
        } else {
            Money::zero()
        }
    }

    /// Whole-number percent off the original price, rounded half-up.
    ///
    /// ```rust
    /// use karigar_core::money::Money;
    /// use karigar_core::types::CartItem;
    ///
    /// let item = CartItem::new("pot", "Terracotta Set", Money::from_rupees(3_200))
    ///     .with_original_price(Money::from_rupees(4_000));
    /// assert_eq!(item.percent_off(), 20);
    /// ```
    pub fn percent_off(&self) -> u32 {
        let original = self.original_price.paise();
        let price = self.price.paise();
        if original <= 0 || price >= original {
            return 0;
        }
        (((original - price) * 100 + original / 2) / original) as u32
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
