//! Property-based tests for the cart state machine and pricing
//!
//! These drive `CartStore` with arbitrary sequences of add/remove operations
//! and check the invariants that must hold regardless of order: one line per
//! product, stable insertion order, write-through persistence, and totals
//! that always add up.

use cart_session::{
    CartState, CartStore, KeyedStore, LineItem, MemoryStore, Money, config::PricingConfig,
    identity::SessionAuth, pricing,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
enum Op {
    Add(LineItem),
    Remove(String),
}

/// Small product id space so repeats and removals actually collide
fn product_id_strategy() -> impl Strategy<Value = String> {
    (0u8..6).prop_map(|n| format!("p{n}"))
}

/// Prices in cents, up to 50,000.00
fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    (product_id_strategy(), 0i64..5_000_000, 1u32..20).prop_map(|(id, cents, qty)| {
        LineItem::new(
            id.clone(),
            format!("Product {id}"),
            format!("/images/{id}.jpg"),
            Money::new(Decimal::new(cents, 2)),
            qty + 5,
            qty,
        )
    })
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => line_item_strategy().prop_map(Op::Add),
        1 => product_id_strategy().prop_map(Op::Remove),
    ]
}

// PROPERTY TESTS
proptest! {
    /// Property: no sequence of operations produces two lines for one product
    #[test]
    fn prop_product_ids_stay_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut cart = CartStore::new(MemoryStore::new(), SessionAuth::new());

        for op in ops {
            match op {
                Op::Add(item) => cart.add_item(item),
                Op::Remove(id) => cart.remove_item(&id),
            }
        }

        let mut ids: Vec<_> = cart.items().iter().map(|i| i.product_id.clone()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    /// Property: the cart matches a simple model where a product's first add
    /// fixes its position and the latest add fixes its fields
    #[test]
    fn prop_matches_replace_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut cart = CartStore::new(MemoryStore::new(), SessionAuth::new());
        let mut model: Vec<LineItem> = Vec::new();

        for op in ops {
            match op {
                Op::Add(item) => {
                    match model.iter().position(|m| m.product_id == item.product_id) {
                        Some(idx) => model[idx] = item.clone(),
                        None => model.push(item.clone()),
                    }
                    cart.add_item(item);
                }
                Op::Remove(id) => {
                    model.retain(|m| m.product_id != id);
                    cart.remove_item(&id);
                }
            }
        }

        prop_assert_eq!(cart.items(), model.as_slice());
    }

    /// Property: storage always holds exactly what is in memory after a mutation
    #[test]
    fn prop_write_through(ops in prop::collection::vec(op_strategy(), 1..20)) {
        let mut cart = CartStore::new(MemoryStore::new(), SessionAuth::new());

        for op in ops {
            match op {
                Op::Add(item) => cart.add_item(item),
                Op::Remove(id) => cart.remove_item(&id),
            }
            let stored: Option<CartState> = cart.store().load("cart_guest");
            prop_assert_eq!(stored.as_ref(), Some(cart.state()));
        }
    }

    /// Property: total is within a cent of the sum of the rounded parts, and
    /// shipping is either zero or the surcharge
    #[test]
    fn prop_totals_add_up(items in prop::collection::vec(line_item_strategy(), 0..8)) {
        let config = PricingConfig::default();
        let summary = pricing::derive(&items, &config);

        let parts = summary.items_price.amount()
            + summary.shipping_price.amount()
            + summary.tax_price.amount();
        let drift = (summary.total_price.amount() - parts).abs();
        prop_assert!(drift <= Decimal::new(1, 2), "drift {} too large", drift);

        prop_assert!(
            summary.shipping_price == Money::ZERO
                || summary.shipping_price == Money::new(config.shipping_surcharge)
        );
        prop_assert_eq!(
            summary.shipping_price == Money::ZERO,
            summary.items_price.amount() >= config.free_shipping_threshold
        );
    }

    /// Property: derivation is deterministic
    #[test]
    fn prop_derive_is_pure(items in prop::collection::vec(line_item_strategy(), 0..8)) {
        let config = PricingConfig::default();
        prop_assert_eq!(pricing::derive(&items, &config), pricing::derive(&items, &config));
    }
}
