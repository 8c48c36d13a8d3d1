//! "Variant" picker of the product dialog: the lines of one product that
//! are already in the cart, plus an entry for adding a new one.

use cart_config::CartConfig;
use cart_store::{Cart, CartItem};
use serde::Serialize;

/// Which entry the picker should select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantRequest {
    /// The "add new variant" entry.
    New,
    /// The first line of the product, if any.
    First,
    /// A specific slot; falls back to `New` when it is not a line of the
    /// product.
    Slot(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantOption {
    pub slot: usize,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantPicker {
    /// Hidden when the product has no lines in the cart.
    pub visible: bool,
    pub new_label: String,
    pub new_selected: bool,
    pub options: Vec<VariantOption>,
    pub selected_slot: Option<usize>,
}

/// `qty measurement[, k: v, ...][, note]`
pub fn variant_label(item: &CartItem) -> String {
    let mut label = format!("{} {}", item.quantity, item.measurement);
    let pairs = item.option_pairs();
    if !pairs.is_empty() {
        let joined = pairs
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ");
        label.push_str(", ");
        label.push_str(&joined);
    }
    if let Some(note) = item.note() {
        label.push_str(", ");
        label.push_str(note);
    }
    label
}

pub fn render_variant_picker(
    cart: &Cart,
    product_id: i64,
    request: VariantRequest,
    cfg: &CartConfig,
) -> VariantPicker {
    let matches: Vec<(usize, &CartItem)> = cart.product_items(product_id).collect();

    let selected_slot = match request {
        VariantRequest::New => None,
        VariantRequest::First => matches.first().map(|(slot, _)| *slot),
        VariantRequest::Slot(want) => matches
            .iter()
            .find(|(slot, _)| *slot == want)
            .map(|(slot, _)| *slot),
    };

    let options = matches
        .iter()
        .map(|(slot, item)| VariantOption {
            slot: *slot,
            label: variant_label(item),
            selected: Some(*slot) == selected_slot,
        })
        .collect::<Vec<_>>();

    VariantPicker {
        visible: !options.is_empty(),
        new_label: cfg.view.new_variant_label.clone(),
        new_selected: selected_slot.is_none(),
        options,
        selected_slot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn line(id: i64, quantity: i64) -> CartItem {
        CartItem {
            id,
            name: String::new(),
            sku: String::new(),
            vendor: String::new(),
            image: None,
            measurement: "m2".to_string(),
            price: 1.0,
            quantity,
            text: None,
            options: None,
        }
    }

    fn cart() -> Cart {
        Cart::from_slots(vec![
            Some(line(7, 2)),
            Some(line(8, 1)),
            None,
            Some(line(7, 5)),
        ])
    }

    #[test]
    fn label_lists_options_then_note() {
        let mut item = line(7, 3);
        let mut opts = BTreeMap::new();
        opts.insert("Color".to_string(), "Red".to_string());
        opts.insert("Size".to_string(), "L".to_string());
        item.options = Some(opts);
        item.text = Some("gift".to_string());
        assert_eq!(variant_label(&item), "3 m2, Color: Red, Size: L, gift");
        assert_eq!(variant_label(&line(7, 1)), "1 m2");
    }

    #[test]
    fn first_selects_earliest_match() {
        let picker =
            render_variant_picker(&cart(), 7, VariantRequest::First, &CartConfig::default());
        assert!(picker.visible);
        assert_eq!(picker.selected_slot, Some(0));
        assert!(!picker.new_selected);
        let slots: Vec<usize> = picker.options.iter().map(|o| o.slot).collect();
        assert_eq!(slots, vec![0, 3]);
        assert!(picker.options[0].selected);
    }

    #[test]
    fn requested_slot_is_selected() {
        let picker =
            render_variant_picker(&cart(), 7, VariantRequest::Slot(3), &CartConfig::default());
        assert_eq!(picker.selected_slot, Some(3));
        assert!(picker.options[1].selected);
        assert!(!picker.options[0].selected);
    }

    #[test]
    fn foreign_slot_falls_back_to_new() {
        let picker =
            render_variant_picker(&cart(), 7, VariantRequest::Slot(1), &CartConfig::default());
        assert_eq!(picker.selected_slot, None);
        assert!(picker.new_selected);
        assert!(picker.options.iter().all(|o| !o.selected));
    }

    #[test]
    fn no_matches_hides_picker() {
        let picker =
            render_variant_picker(&cart(), 99, VariantRequest::First, &CartConfig::default());
        assert!(!picker.visible);
        assert!(picker.options.is_empty());
        assert_eq!(picker.selected_slot, None);
        assert_eq!(picker.new_label, "Добавить новый вариант");
    }
}
