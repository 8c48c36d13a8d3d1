//! Scenario: slot indices stay stable for the life of a page.
//!
//! # Invariants under test
//!
//! 1. Removing any line leaves every other rendered line on the same slot
//!    with the same field names.
//! 2. Only page load (`open_cart_page`) renumbers slots, and afterwards the
//!    field names are contiguous from 0.
//! 3. Checkout fields are exactly the concatenation of the rendered lines'
//!    fields.

use cart_config::CartConfig;
use cart_schemas::ProductDataset;
use cart_store::MemoryStorage;
use cart_view::{checkout_fields, CartEvent, CartSession, LineItemView};
use proptest::prelude::*;

fn dataset(id: i64) -> ProductDataset {
    ProductDataset {
        id,
        name: format!("product {id}"),
        sku: format!("SKU{id}"),
        price: 1.5,
        vendor: "v".to_string(),
        image: None,
        measurement: "pcs".to_string(),
    }
}

fn session_with(lines: &[(i64, i64)]) -> CartSession<MemoryStorage> {
    let mut s = CartSession::new(MemoryStorage::new(), CartConfig::default());
    for &(id, qty) in lines {
        s.handle(CartEvent::AddToCart {
            product: dataset(id),
            quantity: qty.to_string(),
            text: String::new(),
            options: Vec::new(),
            slot: None,
        })
        .expect("add");
    }
    s
}

fn remove(slot: usize) -> CartEvent {
    CartEvent::EditLine {
        slot,
        quantity: "0".to_string(),
        text: String::new(),
    }
}

fn names_by_slot(items: &[LineItemView]) -> Vec<(usize, Vec<String>)> {
    items
        .iter()
        .map(|i| (i.slot, i.fields.iter().map(|f| f.name.clone()).collect()))
        .collect()
}

proptest! {
    #[test]
    fn removal_keeps_other_slots(
        lines in prop::collection::vec((1_i64..4, 1_i64..9), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut s = session_with(&lines);
        let before = s.open_cart_page().expect("page");
        let victim = before.items[pick.index(before.items.len())].slot;

        let update = s.handle(remove(victim)).expect("edit");
        prop_assert_eq!(update.removed_slot, Some(victim));

        let cart = s.cart();
        let after: Vec<LineItemView> = cart
            .items()
            .map(|(slot, item)| cart_view::render_line_item(slot, item, s.config()))
            .collect();
        let expected: Vec<_> = names_by_slot(&before.items)
            .into_iter()
            .filter(|(slot, _)| *slot != victim)
            .collect();
        prop_assert_eq!(names_by_slot(&after), expected);
    }

    #[test]
    fn page_load_renumbers_contiguously(
        lines in prop::collection::vec((1_i64..4, 1_i64..9), 2..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut s = session_with(&lines);
        let victim = pick.index(lines.len());
        s.handle(remove(victim)).expect("edit");

        let page = s.open_cart_page().expect("page");
        let slots: Vec<usize> = page.items.iter().map(|i| i.slot).collect();
        prop_assert_eq!(slots, (0..lines.len() - 1).collect::<Vec<_>>());

        let flattened: Vec<_> = page.items.iter().flat_map(|i| i.fields.clone()).collect();
        prop_assert_eq!(checkout_fields(&s.cart(), s.config()), flattened);
    }
}
