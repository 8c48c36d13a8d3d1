//! cart-schemas
//!
//! Wire types shared by the store, the view layer and the CLI.
//! No business logic lives here beyond small normalising constructors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Session storage key the cart lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "shoppingCart";

/// Selected product options: option name -> chosen value.
pub type OptionMap = BTreeMap<String, String>;

/// One cart line as persisted in session storage.
///
/// Display fields (`name`, `sku`, `vendor`, `image`, `measurement`, `price`)
/// are copied from the product dataset when the line is created and never
/// change afterwards. `quantity`, `text` and `options` are the editable part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub measurement: String,
    #[serde(default)]
    pub price: f64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionMap>,
}

impl CartItem {
    /// Build a new line from a product dataset. Editable fields are filled
    /// by the caller.
    pub fn from_dataset(product: &ProductDataset, quantity: i64) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            sku: product.sku.clone(),
            vendor: product.vendor.clone(),
            image: product.image.clone().filter(|s| !s.is_empty()),
            measurement: product.measurement.clone(),
            price: product.price,
            quantity,
            text: None,
            options: None,
        }
    }

    /// Options in display order, empty when none were selected.
    pub fn option_pairs(&self) -> Vec<(&str, &str)> {
        self.options
            .as_ref()
            .map(|m| m.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect())
            .unwrap_or_default()
    }

    /// The note, if one is set and non-empty.
    pub fn note(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Static fields a product form carries (the catalog card's dataset).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductDataset {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub measurement: String,
}

/// A single option `<select>` as the host reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelect {
    pub name: String,
    pub value: String,
    /// The checked `<option>` is a disabled placeholder.
    #[serde(default)]
    pub disabled: bool,
}

/// Collect the chosen options of a product form, skipping selects whose
/// checked entry is a disabled placeholder.
pub fn collect_options(selects: &[OptionSelect]) -> OptionMap {
    selects
        .iter()
        .filter(|s| !s.disabled)
        .map(|s| (s.name.clone(), s.value.clone()))
        .collect()
}

/// A named form input (`name=value`) as posted on checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> ProductDataset {
        ProductDataset {
            id: 7,
            name: "Cement M500".to_string(),
            sku: "CEM-500".to_string(),
            price: 10.0,
            vendor: "Acme".to_string(),
            image: Some(String::new()),
            measurement: "bag".to_string(),
        }
    }

    #[test]
    fn from_dataset_copies_display_fields() {
        let item = CartItem::from_dataset(&dataset(), 2);
        assert_eq!(item.id, 7);
        assert_eq!(item.sku, "CEM-500");
        assert_eq!(item.quantity, 2);
        // empty image attribute is treated as absent
        assert_eq!(item.image, None);
        assert!(item.text.is_none());
    }

    #[test]
    fn optional_fields_are_omitted_on_the_wire() {
        let item = CartItem::from_dataset(&dataset(), 1);
        let v = serde_json::to_value(&item).unwrap();
        assert!(v.get("text").is_none());
        assert!(v.get("options").is_none());
        assert!(v.get("image").is_none());
        assert_eq!(v["price"], 10.0);
    }

    #[test]
    fn missing_display_fields_default_on_decode() {
        let item: CartItem = serde_json::from_str(r#"{"id":3,"quantity":4}"#).unwrap();
        assert_eq!(item.name, "");
        assert_eq!(item.price, 0.0);
        assert_eq!(item.quantity, 4);
    }

    #[test]
    fn collect_options_skips_disabled_placeholders() {
        let selects = vec![
            OptionSelect {
                name: "Color".to_string(),
                value: "Red".to_string(),
                disabled: false,
            },
            OptionSelect {
                name: "Size".to_string(),
                value: "0".to_string(),
                disabled: true,
            },
        ];
        let opts = collect_options(&selects);
        assert_eq!(opts.len(), 1);
        assert_eq!(opts.get("Color").map(String::as_str), Some("Red"));
    }

    #[test]
    fn note_ignores_empty_text() {
        let mut item = CartItem::from_dataset(&dataset(), 1);
        item.text = Some(String::new());
        assert_eq!(item.note(), None);
        item.text = Some("deliver by noon".to_string());
        assert_eq!(item.note(), Some("deliver by noon"));
    }
}
