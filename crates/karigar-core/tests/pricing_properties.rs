use karigar_core::*;
use proptest::prelude::*;

fn arb_rule() -> impl Strategy<Value = CouponRule> {
    (1u32..=10_000, 0i64..5_000_000, 0i64..2_000_000).prop_map(|(bps, min, cap)| {
        CouponRule::new(
            "PROP",
            Rate::from_bps(bps),
            Money::from_paise(min),
            Money::from_paise(cap),
        )
    })
}

fn arb_items() -> impl Strategy<Value = Vec<CartItem>> {
    prop::collection::vec((0i64..5_000_000, 1u32..=20), 0..8).prop_map(|lines| {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, (paise, qty))| {
                CartItem::new(format!("item-{}", i), format!("Item {}", i), Money::from_paise(paise))
                    .with_quantity(qty)
            })
            .collect()
    })
}

#[test]
fn test_documented_examples() {
    let book = CouponBook::default();

    let welcome = book.evaluate("WELCOME10", Money::from_rupees(12_500)).unwrap();
    assert_eq!(welcome.discount, Money::from_rupees(1_250));

    let artisan = book.evaluate("ARTISAN20", Money::from_rupees(25_000)).unwrap();
    assert_eq!(artisan.discount, Money::from_rupees(5_000));

    let capped = book.evaluate("ARTISAN20", Money::from_rupees(30_000)).unwrap();
    assert_eq!(capped.discount, Money::from_rupees(5_000));

    let craft = book.evaluate("CRAFT25", Money::from_rupees(5_000)).unwrap_err();
    assert!(matches!(
        craft,
        CouponError::MinimumNotMet { minimum, .. } if minimum == Money::from_rupees(15_000)
    ));

    let config = PricingConfig::default();
    assert_eq!(config.shipping_for(Money::from_rupees(9_000)), Money::from_rupees(200));
    assert_eq!(config.shipping_for(Money::from_rupees(10_001)), Money::zero());
}

proptest! {
    #[test]
    fn prop_discount_is_min_of_rate_and_cap(rule in arb_rule(), subtotal in 0i64..10_000_000) {
        let subtotal = Money::from_paise(subtotal);
        let book = CouponBook::from_rules([rule.clone()]);

        match book.evaluate("prop", subtotal) {
            Ok(applied) => {
                prop_assert!(subtotal >= rule.min_purchase);
                prop_assert_eq!(applied.discount, subtotal.apply_rate(rule.rate).min(rule.max_discount));
                prop_assert!(applied.discount <= rule.max_discount);
            }
            Err(CouponError::MinimumNotMet { minimum, shortfall, .. }) => {
                prop_assert!(subtotal < rule.min_purchase);
                prop_assert_eq!(minimum, rule.min_purchase);
                prop_assert_eq!(shortfall, rule.min_purchase - subtotal);
                prop_assert_eq!(rule.discount_for(subtotal), Money::zero());
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn prop_total_identity_and_shipping_rule(items in arb_items(), mask in any::<u8>(), rule in arb_rule()) {
        let mut selection = SelectionSet::new();
        for (i, item) in items.iter().enumerate() {
            if mask & (1 << i) != 0 {
                selection.select(&item.id);
            }
        }
        let config = PricingConfig::default();
        let b = compute_breakdown(&items, &selection, Some(&rule), &config);

        prop_assert_eq!(b.total, b.subtotal - b.discount + b.shipping + b.tax);
        prop_assert_eq!(b.shipping.is_zero(), b.subtotal > config.free_shipping_threshold);
        prop_assert!(!b.subtotal.is_negative());
        prop_assert!(!b.discount.is_negative());
        prop_assert!(b.discount <= b.subtotal);
        prop_assert!(!b.total.is_negative());
    }

    #[test]
    fn prop_double_toggle_is_identity(items in arb_items(), pick in any::<prop::sample::Index>()) {
        let mut cart = Cart::new();
        for item in items {
            cart.add_item(item).unwrap();
        }
        prop_assume!(!cart.is_empty());

        let id = cart.items()[pick.index(cart.item_count())].id.clone();
        let before = cart.selection().clone();
        cart.toggle(&id);
        cart.toggle(&id);
        prop_assert_eq!(cart.selection(), &before);
    }

    #[test]
    fn prop_removal_leaves_no_orphans(items in arb_items(), picks in prop::collection::vec(any::<prop::sample::Index>(), 0..4)) {
        let mut cart = Cart::new();
        for item in items {
            cart.add_item(item).unwrap();
        }

        for pick in picks {
            if cart.is_empty() {
                break;
            }
            let id = cart.items()[pick.index(cart.item_count())].id.clone();
            cart.remove_item(&id).unwrap();
            prop_assert!(!cart.is_selected(&id));
        }

        for id in cart.selection().iter() {
            prop_assert!(cart.contains(id));
        }
    }
}
