//! One rendered cart line.
//!
//! Field names carry the slot index (`cart-_-quantity` -> `cart-3-quantity`)
//! so a full-cart submission posts a list of line forms. The slot is also
//! what the line's Clone/Edit actions refer to.

use cart_config::CartConfig;
use cart_schemas::FormField;
use cart_store::{line_total, CartItem, Micros};
use serde::Serialize;

/// Click targets on a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LineAction {
    Clone { slot: usize },
    Edit { slot: usize },
}

/// The options row: visible pairs plus the JSON posted in the hidden field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsRow {
    pub pairs: Vec<(String, String)>,
    pub json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItemView {
    pub slot: usize,
    pub product_id: i64,
    pub name: String,
    pub sku: String,
    pub vendor: String,
    pub image: Option<String>,
    pub measurement: String,
    pub quantity: i64,
    pub price_text: String,
    pub cost_text: String,
    /// Note row, shown only when a note exists.
    pub note: Option<String>,
    /// Options row, shown only when options were selected.
    pub options: Option<OptionsRow>,
    /// product, quantity, text, options, with slot-specific names.
    pub fields: Vec<FormField>,
    pub actions: [LineAction; 2],
}

/// Replace the first occurrence of `placeholder` in `template` with `slot`.
pub fn fill_field_name(template: &str, placeholder: &str, slot: usize) -> String {
    template.replacen(placeholder, &slot.to_string(), 1)
}

pub fn render_line_item(slot: usize, item: &CartItem, cfg: &CartConfig) -> LineItemView {
    let decimals = cfg.format.decimals;
    let note = item.note().map(str::to_string);

    let options = item.options.as_ref().filter(|m| !m.is_empty()).map(|m| OptionsRow {
        pairs: m.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        // string map serialization cannot fail
        json: serde_json::to_string(m).unwrap_or_default(),
    });

    let names = &cfg.view.fields;
    let placeholder = cfg.view.field_placeholder.as_str();
    let fields = vec![
        FormField::new(
            fill_field_name(&names.product, placeholder, slot),
            item.id.to_string(),
        ),
        FormField::new(
            fill_field_name(&names.quantity, placeholder, slot),
            item.quantity.to_string(),
        ),
        FormField::new(
            fill_field_name(&names.text, placeholder, slot),
            note.clone().unwrap_or_default(),
        ),
        FormField::new(
            fill_field_name(&names.options, placeholder, slot),
            options.as_ref().map(|o| o.json.clone()).unwrap_or_default(),
        ),
    ];

    LineItemView {
        slot,
        product_id: item.id,
        name: item.name.clone(),
        sku: item.sku.clone(),
        vendor: item.vendor.clone(),
        image: item.image.clone().filter(|s| !s.is_empty()),
        measurement: item.measurement.clone(),
        quantity: item.quantity,
        price_text: Micros::from_price(item.price).format_grouped(decimals, ""),
        cost_text: line_total(item).format_grouped(decimals, ""),
        note,
        options,
        fields,
        actions: [LineAction::Clone { slot }, LineAction::Edit { slot }],
    }
}
