//! Sample cart used by the demo binary and the store tests.

use karigar_core::{CartItem, Customization, Money, Variant};

/// The storefront's showcase cart: a customized saree, two paintings and a
/// pottery set.
pub fn sample_cart_items() -> Vec<CartItem> {
    vec![
        CartItem::new(
            "banarasi-silk-saree",
            "Handwoven Banarasi Silk Saree",
            Money::from_rupees(12_500),
        )
        .with_original_price(Money::from_rupees(15_000))
        .with_variant(Variant::new("Maroon", "M"))
        .with_personalization("Wedding Saree with golden zari work")
        .with_customization(Customization::Color("Maroon".to_string()))
        .with_customization(Customization::Pattern("Traditional Zari".to_string()))
        .with_customization(Customization::Embroidery("Gold Thread".to_string()))
        .with_seller("Rajesh Weavers")
        .with_delivery_estimate("15-20 days"),
        CartItem::new(
            "madhubani-painting",
            "Madhubani Painting Wall Art",
            Money::from_rupees(8_500),
        )
        .with_original_price(Money::from_rupees(10_000))
        .with_quantity(2)
        .with_variant(Variant::new("Multicolor", "24x36 inches"))
        .with_seller("Mithila Artisans")
        .with_delivery_estimate("10-15 days"),
        CartItem::new(
            "terracotta-pottery-set",
            "Terracotta Pottery Set",
            Money::from_rupees(3_200),
        )
        .with_original_price(Money::from_rupees(4_000))
        .with_variant(Variant::new("Terracotta", "Set of 3"))
        .with_seller("Clay Craft Studio")
        .with_delivery_estimate("5-7 days"),
    ]
}
