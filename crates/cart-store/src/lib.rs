//! cart-store
//!
//! Session-persisted shopping cart.
//! - Slot-indexed lines; removal tombstones, compaction only on init/clean
//! - Malformed stored data recovers to an empty cart (logged, never fatal)
//! - Fixed-point money for totals
//! - No IO of its own: persistence goes through [`SessionStorage`]

mod cart;
mod money;
mod storage;
mod store;

pub use cart::{line_total, Cart, DecodeError};
pub use money::{Micros, MICROS_SCALE};
pub use storage::{MemoryStorage, SessionStorage, StorageError};
pub use store::{coerce_quantity, CartError, CartStore, FormState, UpsertOutcome};

pub use cart_schemas::{CartItem, OptionMap, ProductDataset, DEFAULT_STORAGE_KEY};
