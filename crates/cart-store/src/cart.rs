//! The slot-indexed cart and its wire codec.
//!
//! A slot index is the identity of a line for the lifetime of a page
//! session: rendered field names and open dialogs refer to it. Removing a
//! line therefore tombstones its slot instead of shifting later slots.
//! Compaction (dropping tombstones) only happens through
//! [`Cart::compacted`], which the store calls on page load and on explicit
//! clean.

use cart_schemas::CartItem;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::money::Micros;

/// Why a stored string could not be read as a cart at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Not parseable as JSON.
    InvalidJson(String),
    /// Valid JSON but not an array (`found` names the JSON type).
    NotAnArray { found: &'static str },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(msg) => write!(f, "cart data is not valid JSON: {msg}"),
            Self::NotAnArray { found } => {
                write!(f, "cart data must be a JSON array, found {found}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Ordered cart slots. `None` is a tombstone left by a removed line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    slots: Vec<Option<CartItem>>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: Vec<Option<CartItem>>) -> Self {
        Self { slots }
    }

    /// Decode the persisted string.
    ///
    /// Whole-document problems are errors. Individual array elements that
    /// are not a valid item, or items with quantity <= 0, decode as
    /// tombstones so the remaining slots keep their indices.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
        let elements = match value {
            Value::Array(elements) => elements,
            other => {
                return Err(DecodeError::NotAnArray {
                    found: json_type_name(&other),
                })
            }
        };

        let slots = elements
            .into_iter()
            .enumerate()
            .map(|(slot, element)| decode_slot(slot, element))
            .collect();
        Ok(Self { slots })
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.slots)
    }

    /// All slots including tombstones.
    pub fn slots(&self) -> &[Option<CartItem>] {
        &self.slots
    }

    /// Number of slots including tombstones.
    pub fn slot_len(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<&CartItem> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut CartItem> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Present lines with their slot index, in slot order.
    pub fn items(&self) -> impl Iterator<Item = (usize, &CartItem)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| item.as_ref().map(|item| (slot, item)))
    }

    /// Present lines of one product, in slot order.
    pub fn product_items(&self, product_id: i64) -> impl Iterator<Item = (usize, &CartItem)> {
        self.items().filter(move |(_, item)| item.id == product_id)
    }

    /// Number of present lines.
    pub fn count(&self) -> usize {
        self.items().count()
    }

    /// `true` when no line is present (tombstones do not count).
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn has_tombstones(&self) -> bool {
        self.slots.iter().any(Option::is_none)
    }

    /// Σ price × quantity over present lines.
    pub fn total_value(&self) -> Micros {
        self.items().map(|(_, item)| line_total(item)).sum()
    }

    /// Σ quantity over present lines of `product_id`.
    pub fn aggregate_for_product(&self, product_id: i64) -> i64 {
        self.product_items(product_id)
            .fold(0_i64, |acc, (_, item)| acc.saturating_add(item.quantity))
    }

    /// Distinct product ids in first-appearance order.
    pub fn product_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = Vec::new();
        for (_, item) in self.items() {
            if !ids.contains(&item.id) {
                ids.push(item.id);
            }
        }
        ids
    }

    /// Append a line and return its slot.
    pub fn push(&mut self, item: CartItem) -> usize {
        debug_assert!(item.quantity > 0, "cart lines must have quantity > 0");
        self.slots.push(Some(item));
        self.slots.len() - 1
    }

    /// Tombstone a slot, returning the removed line.
    pub fn tombstone(&mut self, slot: usize) -> Option<CartItem> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Copy of this cart with tombstones dropped. Slot indices change.
    pub fn compacted(&self) -> Cart {
        Cart {
            slots: self.slots.iter().filter(|s| s.is_some()).cloned().collect(),
        }
    }
}

/// price × quantity for one line, in micros.
pub fn line_total(item: &CartItem) -> Micros {
    Micros::from_price(item.price).saturating_mul_qty(item.quantity)
}

fn decode_slot(slot: usize, element: Value) -> Option<CartItem> {
    if element.is_null() {
        return None;
    }
    match serde_json::from_value::<CartItem>(element) {
        Ok(item) if item.quantity > 0 => Some(item),
        Ok(item) => {
            warn!(
                slot,
                product_id = item.id,
                quantity = item.quantity,
                "dropping stored cart line with non-positive quantity"
            );
            None
        }
        Err(err) => {
            warn!(slot, error = %err, "dropping malformed stored cart line");
            None
        }
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
