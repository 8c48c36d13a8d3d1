//! Add (product) and edit (cart line) dialog view models.

use cart_config::CartConfig;
use cart_store::Cart;
use serde::Serialize;

use crate::variants::{render_variant_picker, VariantPicker, VariantRequest};

/// Value of an option select's placeholder entry.
pub const UNSELECTED_OPTION: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectValue {
    pub name: String,
    pub value: String,
}

/// Product dialog after sync.
///
/// In "new" mode every field is blank and no change notification is sent.
/// In existing mode every option select is listed in `changed_selects` so
/// that dependent controls re-evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddDialogState {
    pub product_id: i64,
    pub picker: VariantPicker,
    /// Slot the submit button is bound to; `None` adds a new line.
    pub slot: Option<usize>,
    pub quantity: String,
    pub text: String,
    pub selects: Vec<SelectValue>,
    pub changed_selects: Vec<String>,
}

/// Options are shown read-only in the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadOnlyOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditDialogState {
    pub slot: usize,
    pub title: String,
    pub measurement: String,
    pub quantity: String,
    pub text: String,
    pub options: Vec<ReadOnlyOption>,
    /// Empty string clears the previous line's image.
    pub image: String,
}

/// Sync the product dialog. `select_names` are the option selects the
/// product form carries.
pub fn sync_add_dialog(
    cart: &Cart,
    product_id: i64,
    select_names: &[String],
    request: VariantRequest,
    cfg: &CartConfig,
) -> AddDialogState {
    let picker = render_variant_picker(cart, product_id, request, cfg);
    let slot = picker.selected_slot;

    match slot.and_then(|s| cart.get(s)) {
        Some(item) => {
            let selects = select_names
                .iter()
                .map(|name| SelectValue {
                    name: name.clone(),
                    value: item
                        .options
                        .as_ref()
                        .and_then(|m| m.get(name))
                        .cloned()
                        .unwrap_or_else(|| UNSELECTED_OPTION.to_string()),
                })
                .collect();
            AddDialogState {
                product_id,
                slot,
                quantity: item.quantity.to_string(),
                text: item.text.clone().unwrap_or_default(),
                selects,
                changed_selects: select_names.to_vec(),
                picker,
            }
        }
        None => AddDialogState {
            product_id,
            slot: None,
            quantity: String::new(),
            text: String::new(),
            selects: select_names
                .iter()
                .map(|name| SelectValue {
                    name: name.clone(),
                    value: UNSELECTED_OPTION.to_string(),
                })
                .collect(),
            changed_selects: Vec::new(),
            picker,
        },
    }
}

/// Sync the cart-line dialog; `None` when the slot holds no line.
pub fn sync_edit_dialog(cart: &Cart, slot: usize) -> Option<EditDialogState> {
    let item = cart.get(slot)?;
    Some(EditDialogState {
        slot,
        title: item.name.clone(),
        measurement: item.measurement.clone(),
        quantity: item.quantity.to_string(),
        text: item.text.clone().unwrap_or_default(),
        options: item
            .option_pairs()
            .into_iter()
            .map(|(k, v)| ReadOnlyOption {
                label: k.to_string(),
                value: v.to_string(),
            })
            .collect(),
        image: item.image.clone().unwrap_or_default(),
    })
}
