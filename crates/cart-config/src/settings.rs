//! Typed settings read from the merged config tree.
//!
//! Every field has a default, so an empty document yields the storefront's
//! stock behaviour. Present-but-wrong-typed values are errors.

use anyhow::{bail, Result};
use cart_schemas::DEFAULT_STORAGE_KEY;
use serde_json::Value;

pub const DEFAULT_SUMMARY_TEMPLATE: &str = "{count} позиции на сумму {total}";
pub const DEFAULT_NEW_VARIANT_LABEL: &str = "Добавить новый вариант";

/// Money formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    pub thousands_separator: String,
    pub decimals: u32,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            thousands_separator: " ".to_string(),
            decimals: 2,
        }
    }
}

/// Form field name templates for one rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub product: String,
    pub quantity: String,
    pub text: String,
    pub options: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            product: "cart-_-product".to_string(),
            quantity: "cart-_-quantity".to_string(),
            text: "cart-_-text".to_string(),
            options: "cart-_-options".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Token in a field name template replaced by the slot index.
    pub field_placeholder: String,
    /// Supports `{count}` and `{total}`.
    pub summary_template: String,
    pub new_variant_label: String,
    pub fields: FieldNames,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            field_placeholder: "_".to_string(),
            summary_template: DEFAULT_SUMMARY_TEMPLATE.to_string(),
            new_variant_label: DEFAULT_NEW_VARIANT_LABEL.to_string(),
            fields: FieldNames::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub storage_key: String,
    pub format: FormatConfig,
    pub view: ViewConfig,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            format: FormatConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

impl CartConfig {
    /// Read settings from a merged config tree, falling back to defaults for
    /// absent pointers.
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let d = CartConfig::default();

        let storage_key = read_string(cfg, "/storage/key", &d.storage_key)?;
        if storage_key.trim().is_empty() {
            bail!("CONFIG_INVALID: /storage/key must not be empty");
        }

        let decimals = match cfg.pointer("/format/decimals") {
            None | Some(Value::Null) => d.format.decimals,
            Some(v) => match v.as_u64() {
                Some(n) if n <= 6 => n as u32,
                _ => bail!("CONFIG_INVALID: /format/decimals must be an integer in 0..=6, got {v}"),
            },
        };

        let field_placeholder =
            read_string(cfg, "/view/field_placeholder", &d.view.field_placeholder)?;
        if field_placeholder.is_empty() {
            bail!("CONFIG_INVALID: /view/field_placeholder must not be empty");
        }

        Ok(Self {
            storage_key,
            format: FormatConfig {
                thousands_separator: read_string(
                    cfg,
                    "/format/thousands_separator",
                    &d.format.thousands_separator,
                )?,
                decimals,
            },
            view: ViewConfig {
                field_placeholder,
                summary_template: read_string(
                    cfg,
                    "/view/summary_template",
                    &d.view.summary_template,
                )?,
                new_variant_label: read_string(
                    cfg,
                    "/view/new_variant_label",
                    &d.view.new_variant_label,
                )?,
                fields: FieldNames {
                    product: read_string(cfg, "/view/fields/product", &d.view.fields.product)?,
                    quantity: read_string(cfg, "/view/fields/quantity", &d.view.fields.quantity)?,
                    text: read_string(cfg, "/view/fields/text", &d.view.fields.text)?,
                    options: read_string(cfg, "/view/fields/options", &d.view.fields.options)?,
                },
            },
        })
    }
}

fn read_string(cfg: &Value, pointer: &str, default: &str) -> Result<String> {
    match cfg.pointer(pointer) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => bail!("CONFIG_INVALID: {pointer} must be a string, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_tree_yields_defaults() {
        let cfg = CartConfig::from_config_json(&json!({})).unwrap();
        assert_eq!(cfg, CartConfig::default());
        assert_eq!(cfg.storage_key, "shoppingCart");
        assert_eq!(cfg.view.fields.options, "cart-_-options");
    }

    #[test]
    fn overrides_are_applied_per_leaf() {
        let cfg = CartConfig::from_config_json(&json!({
            "storage": {"key": "basket"},
            "format": {"thousands_separator": ",", "decimals": 0},
            "view": {"fields": {"text": "order-_-note"}}
        }))
        .unwrap();
        assert_eq!(cfg.storage_key, "basket");
        assert_eq!(cfg.format.thousands_separator, ",");
        assert_eq!(cfg.format.decimals, 0);
        assert_eq!(cfg.view.fields.text, "order-_-note");
        assert_eq!(cfg.view.fields.product, "cart-_-product");
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = CartConfig::from_config_json(&json!({"storage": {"key": 5}})).unwrap_err();
        assert!(err.to_string().contains("/storage/key"));

        let err = CartConfig::from_config_json(&json!({"format": {"decimals": 9}})).unwrap_err();
        assert!(err.to_string().contains("/format/decimals"));
    }

    #[test]
    fn blank_storage_key_is_rejected() {
        assert!(CartConfig::from_config_json(&json!({"storage": {"key": "  "}})).is_err());
    }
}
