//! `CartStore`: the only owner of the persisted cart key.
//!
//! # Purpose
//! Every mutation is "read latest, mutate, write back" against the session
//! store. Handlers never touch the key directly; they go through this
//! façade, which:
//!
//! - Recovers from malformed stored data (empty cart, logged).
//! - Tombstones removed lines so slot indices stay stable until the next
//!   [`CartStore::init`].
//! - Collapses the cart to `[]` once the last present line is removed.
//!
//! # Lifecycle
//! ```ignore
//! let mut store = CartStore::new(MemoryStorage::new());
//! store.init()?;                       // page load: compact tombstones
//! let outcome = store.upsert(&product, &form, None)?;
//! store.reset()?;                      // checkout submitted
//! ```

use cart_schemas::{CartItem, OptionMap, ProductDataset, DEFAULT_STORAGE_KEY};
use tracing::{debug, error, info};

use crate::{
    cart::Cart,
    money::Micros,
    storage::{SessionStorage, StorageError},
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum CartError {
    /// The session store refused the write.
    Storage(StorageError),
    /// The cart could not be serialized.
    Encode(serde_json::Error),
}

impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "cart persist failed: {e}"),
            Self::Encode(e) => write!(f, "cart encode failed: {e}"),
        }
    }
}

impl std::error::Error for CartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            Self::Encode(e) => Some(e),
        }
    }
}

impl From<StorageError> for CartError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Inputs / outcomes
// ---------------------------------------------------------------------------

/// Editable fields read from a product form, already coerced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub quantity: i64,
    pub text: String,
    /// `None` keeps the slot's current options (edit dialog path).
    pub options: Option<OptionMap>,
}

/// What an upsert/edit did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// An existing line was overwritten in place.
    Updated { slot: usize },
    /// A new line was appended.
    Appended { slot: usize },
    /// The line was removed (its slot tombstoned).
    Removed { slot: usize },
    /// Nothing to do: quantity <= 0 and no existing line, or unknown slot.
    Ignored,
}

impl UpsertOutcome {
    /// Slot that still holds the line afterwards.
    pub fn live_slot(&self) -> Option<usize> {
        match *self {
            Self::Updated { slot } | Self::Appended { slot } => Some(slot),
            Self::Removed { .. } | Self::Ignored => None,
        }
    }

    pub fn changed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Coerce a raw quantity input the way a numeric form field does.
///
/// Blank, non-numeric or non-finite input is 0. Fractions truncate toward
/// zero, so `"0.5"` is a removal.
pub fn coerce_quantity(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    if let Ok(n) = raw.parse::<i64>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => f.trunc() as i64,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// CartStore
// ---------------------------------------------------------------------------

pub struct CartStore<S: SessionStorage> {
    storage: S,
    key: String,
}

impl<S: SessionStorage> CartStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Page-load entry point: compacts tombstones left by the previous page.
    pub fn init(&mut self) -> Result<Cart, CartError> {
        let cart = self.clean()?;
        info!(key = %self.key, lines = cart.count(), "cart store initialised");
        Ok(cart)
    }

    /// Clear the cart (checkout submitted).
    pub fn reset(&mut self) -> Result<(), CartError> {
        self.persist(&Cart::new())?;
        info!(key = %self.key, "cart reset");
        Ok(())
    }

    /// Drop the key entirely (session ended).
    pub fn forget(&mut self) -> Result<(), CartError> {
        self.storage.remove_item(&self.key)?;
        info!(key = %self.key, "cart key removed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    /// Read the persisted cart. Never fails: malformed data is logged and
    /// read as an empty cart.
    pub fn load(&self) -> Cart {
        let Some(raw) = self.storage.get_item(&self.key) else {
            return Cart::new();
        };
        if raw.trim().is_empty() {
            return Cart::new();
        }
        match Cart::decode(&raw) {
            Ok(cart) => cart,
            Err(err) => {
                error!(
                    key = %self.key,
                    error = %err,
                    "invalid shopping cart data; using empty cart"
                );
                Cart::new()
            }
        }
    }

    /// [`load`](Self::load) with tombstones dropped; the compacted cart is
    /// written back.
    pub fn clean(&mut self) -> Result<Cart, CartError> {
        let cart = self.load().compacted();
        self.persist(&cart)?;
        Ok(cart)
    }

    pub fn count(&self) -> usize {
        self.load().count()
    }

    pub fn total_value(&self) -> Micros {
        self.load().total_value()
    }

    pub fn aggregate_for_product(&self, product_id: i64) -> i64 {
        self.load().aggregate_for_product(product_id)
    }

    // -----------------------------------------------------------------------
    // Write surface
    // -----------------------------------------------------------------------

    pub fn persist(&mut self, cart: &Cart) -> Result<(), CartError> {
        let raw = cart.encode().map_err(CartError::Encode)?;
        self.storage.set_item(&self.key, raw)?;
        Ok(())
    }

    /// Add a product configuration or overwrite an existing line.
    ///
    /// `slot` identifies an existing line only when it holds a line of the
    /// same product; anything else appends.
    pub fn upsert(
        &mut self,
        product: &ProductDataset,
        form: &FormState,
        slot: Option<usize>,
    ) -> Result<UpsertOutcome, CartError> {
        let mut cart = self.load();
        let existing = slot.filter(|&s| cart.get(s).is_some_and(|item| item.id == product.id));

        let outcome = if form.quantity <= 0 {
            match existing {
                Some(s) => {
                    remove_slot(&mut cart, s);
                    UpsertOutcome::Removed { slot: s }
                }
                None => UpsertOutcome::Ignored,
            }
        } else {
            match existing.and_then(|s| cart.get_mut(s).map(|item| (s, item))) {
                Some((s, item)) => {
                    apply_form(item, form);
                    UpsertOutcome::Updated { slot: s }
                }
                None => {
                    let mut item = CartItem::from_dataset(product, form.quantity);
                    apply_form(&mut item, form);
                    UpsertOutcome::Appended {
                        slot: cart.push(item),
                    }
                }
            }
        };

        if outcome.changed() {
            self.persist(&cart)?;
            debug!(product_id = product.id, quantity = form.quantity, ?outcome, "cart upsert");
        }
        Ok(outcome)
    }

    /// Edit-dialog path: quantity and note of an existing line; options are
    /// read-only there.
    pub fn edit(
        &mut self,
        slot: usize,
        quantity: i64,
        text: &str,
    ) -> Result<UpsertOutcome, CartError> {
        let mut cart = self.load();
        let outcome = if quantity <= 0 {
            if cart.get(slot).is_some() {
                remove_slot(&mut cart, slot);
                UpsertOutcome::Removed { slot }
            } else {
                UpsertOutcome::Ignored
            }
        } else {
            match cart.get_mut(slot) {
                Some(item) => {
                    item.quantity = quantity;
                    item.text = normalize_text(text);
                    UpsertOutcome::Updated { slot }
                }
                None => UpsertOutcome::Ignored,
            }
        };

        if outcome.changed() {
            self.persist(&cart)?;
            debug!(slot, quantity, ?outcome, "cart edit");
        }
        Ok(outcome)
    }

    /// Append a copy of an existing line; returns the new slot.
    pub fn clone_slot(&mut self, slot: usize) -> Result<Option<usize>, CartError> {
        let mut cart = self.load();
        let Some(item) = cart.get(slot).cloned() else {
            return Ok(None);
        };
        let new_slot = cart.push(item);
        self.persist(&cart)?;
        debug!(slot, new_slot, "cart line cloned");
        Ok(Some(new_slot))
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn apply_form(item: &mut CartItem, form: &FormState) {
    item.quantity = form.quantity;
    item.text = normalize_text(&form.text);
    if let Some(options) = &form.options {
        item.options = Some(options.clone());
    }
}

fn normalize_text(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Tombstone `slot`; once nothing is left the cart collapses to `[]`.
fn remove_slot(cart: &mut Cart, slot: usize) {
    cart.tombstone(slot);
    if cart.is_empty() {
        *cart = Cart::new();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
