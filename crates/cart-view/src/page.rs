//! Cart page: all lines, page chrome and checkout form fields.

use cart_config::CartConfig;
use cart_schemas::FormField;
use cart_store::Cart;
use serde::Serialize;

use crate::line_item::{render_line_item, LineItemView};
use crate::summary::render_cart_summary;

/// Visibility of the controls that depend on the cart being non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageChrome {
    pub submit_visible: bool,
    pub comment_visible: bool,
    pub empty_alert_visible: bool,
}

impl PageChrome {
    pub fn for_cart(cart: &Cart) -> Self {
        let has_lines = !cart.is_empty();
        Self {
            submit_visible: has_lines,
            comment_visible: has_lines,
            empty_alert_visible: !has_lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartPageView {
    pub items: Vec<LineItemView>,
    pub chrome: PageChrome,
    pub summary: Option<String>,
}

pub fn render_cart_page(cart: &Cart, cfg: &CartConfig) -> CartPageView {
    CartPageView {
        items: cart
            .items()
            .map(|(slot, item)| render_line_item(slot, item, cfg))
            .collect(),
        chrome: PageChrome::for_cart(cart),
        summary: render_cart_summary(cart, cfg),
    }
}

/// Named inputs posted on checkout, in slot order.
pub fn checkout_fields(cart: &Cart, cfg: &CartConfig) -> Vec<FormField> {
    cart.items()
        .flat_map(|(slot, item)| render_line_item(slot, item, cfg).fields)
        .collect()
}
