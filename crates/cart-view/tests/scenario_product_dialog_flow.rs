//! Scenario: a shopper configures two variants of one product, edits one
//! from the cart page and checks out.
//!
//! # Invariants under test
//!
//! - The product dialog opens on the first existing variant.
//! - Submitting on a bound slot overwrites that line; "new" appends.
//! - Disabled option placeholders are not stored.
//! - Catalog badges aggregate every variant of the product.
//! - Checkout posts slot-named fields and leaves `[]` behind.

use cart_config::{load_layered_yaml_from_strings, CartConfig};
use cart_schemas::{FormField, OptionSelect, ProductDataset};
use cart_store::{MemoryStorage, SessionStorage};
use cart_view::{CartEvent, CartSession, VariantRequest};

fn tiles() -> ProductDataset {
    ProductDataset {
        id: 42,
        name: "Floor tile".to_string(),
        sku: "TILE-42".to_string(),
        price: 1250.0,
        vendor: "Keramika".to_string(),
        image: Some("/media/tile.jpg".to_string()),
        measurement: "m2".to_string(),
    }
}

fn selects(color: &str, size_disabled: bool) -> Vec<OptionSelect> {
    vec![
        OptionSelect {
            name: "Color".to_string(),
            value: color.to_string(),
            disabled: false,
        },
        OptionSelect {
            name: "Size".to_string(),
            value: "0".to_string(),
            disabled: size_disabled,
        },
    ]
}

fn select_names() -> Vec<String> {
    vec!["Color".to_string(), "Size".to_string()]
}

fn add(quantity: &str, color: &str, slot: Option<usize>) -> CartEvent {
    CartEvent::AddToCart {
        product: tiles(),
        quantity: quantity.to_string(),
        text: String::new(),
        options: selects(color, true),
        slot,
    }
}

#[test]
fn configure_edit_and_checkout() {
    let mut s = CartSession::new(MemoryStorage::new(), CartConfig::default());

    // empty cart: dialog opens in "new" mode
    let update = s
        .handle(CartEvent::ShowProductDialog {
            product_id: 42,
            select_names: select_names(),
        })
        .unwrap();
    let dialog = update.add_dialog.unwrap();
    assert_eq!(dialog.slot, None);
    assert!(!dialog.picker.visible);

    s.handle(add("10", "Grey", None)).unwrap();
    // switch the picker to "new" and add a second variant
    s.handle(CartEvent::ChangeVariant {
        product_id: 42,
        select_names: select_names(),
        slot: None,
    })
    .unwrap();
    let update = s.handle(add("4", "White", None)).unwrap();
    assert_eq!(update.add_dialog.as_ref().unwrap().slot, Some(1));
    assert_eq!(update.badge.as_ref().unwrap().quantity, 14);

    let update = s
        .handle(CartEvent::ShowProductDialog {
            product_id: 42,
            select_names: select_names(),
        })
        .unwrap();
    let dialog = update.add_dialog.unwrap();
    assert_eq!(dialog.slot, Some(0));
    assert_eq!(dialog.selects[0].value, "Grey");
    assert_eq!(dialog.picker.options[1].label, "4 m2, Color: White");

    // overwrite the bound first variant
    s.handle(add("12", "Grey", Some(0))).unwrap();
    let cart = s.cart();
    assert_eq!(cart.get(0).unwrap().quantity, 12);
    assert!(!cart.get(0).unwrap().options.as_ref().unwrap().contains_key("Size"));

    let badges = s.open_catalog().unwrap();
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0].value, "16");

    // cart page: edit the second line's note
    let page = s.open_cart_page().unwrap();
    assert_eq!(page.summary.as_deref(), Some("2 позиции на сумму 20 000.00"));
    let update = s
        .handle(CartEvent::EditLine {
            slot: 1,
            quantity: "4".to_string(),
            text: "second floor".to_string(),
        })
        .unwrap();
    assert_eq!(
        update.updated_line.unwrap().note.as_deref(),
        Some("second floor")
    );

    let update = s.handle(CartEvent::Checkout).unwrap();
    let fields = update.submitted.unwrap();
    assert!(fields.contains(&FormField::new("cart-1-text", "second floor")));
    assert!(fields.contains(&FormField::new("cart-0-options", r#"{"Color":"Grey"}"#)));
    assert_eq!(
        s.into_storage().get_item("shoppingCart").as_deref(),
        Some("[]")
    );
}

#[test]
fn configured_storage_key_and_template_are_used() {
    let loaded = load_layered_yaml_from_strings(&[r#"
storage:
  key: "projectCart"
view:
  summary_template: "{count} lines / {total}"
"#])
    .unwrap();
    let cfg = CartConfig::from_config_json(&loaded.config_json).unwrap();
    let mut s = CartSession::new(MemoryStorage::new(), cfg);

    let update = s.handle(add("1", "Grey", None)).unwrap();
    assert_eq!(update.summary.as_deref(), Some("1 lines / 1 250.00"));
    let storage = s.into_storage();
    assert!(storage.get_item("projectCart").is_some());
    assert!(storage.get_item("shoppingCart").is_none());
}

#[test]
fn picker_request_for_stale_slot_falls_back_to_new() {
    let mut s = CartSession::new(MemoryStorage::new(), CartConfig::default());
    s.handle(add("1", "Grey", None)).unwrap();
    let cart = s.cart();
    let state = cart_view::sync_add_dialog(
        &cart,
        42,
        &select_names(),
        VariantRequest::Slot(9),
        s.config(),
    );
    assert_eq!(state.slot, None);
    assert!(state.picker.visible);
    assert!(state.picker.new_selected);
}
