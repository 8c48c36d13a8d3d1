//! Catalog page "already in cart" quantity badges.

use cart_store::Cart;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductBadge {
    pub product_id: i64,
    pub quantity: i64,
    /// Quantity input text; blank when nothing is in the cart.
    pub value: String,
    pub highlight: bool,
    pub plus_visible: bool,
}

pub fn render_product_badge(cart: &Cart, product_id: i64) -> ProductBadge {
    let quantity = cart.aggregate_for_product(product_id);
    let in_cart = quantity > 0;
    ProductBadge {
        product_id,
        quantity,
        value: if in_cart {
            quantity.to_string()
        } else {
            String::new()
        },
        highlight: in_cart,
        plus_visible: in_cart,
    }
}

/// One badge per product in the cart, in first-appearance order.
pub fn render_catalog_badges(cart: &Cart) -> Vec<ProductBadge> {
    cart.product_ids()
        .into_iter()
        .map(|id| render_product_badge(cart, id))
        .collect()
}
