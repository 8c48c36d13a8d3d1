//! Event handlers.
//!
//! Each [`CartEvent`] is one user interaction. `CartSession::handle` reads
//! the latest cart, mutates it through [`CartStore`], and returns a
//! [`ViewUpdate`] naming exactly what the host must re-render. Handlers do
//! no validation beyond quantity coercion and the quantity > 0 rule that
//! the store applies.

use cart_config::CartConfig;
use cart_schemas::{collect_options, FormField, OptionSelect, ProductDataset};
use cart_store::{
    coerce_quantity, Cart, CartError, CartStore, FormState, SessionStorage, UpsertOutcome,
};
use serde::Serialize;
use tracing::debug;

use crate::catalog::{render_catalog_badges, render_product_badge, ProductBadge};
use crate::dialog::{sync_add_dialog, sync_edit_dialog, AddDialogState, EditDialogState};
use crate::line_item::{render_line_item, LineAction, LineItemView};
use crate::page::{checkout_fields, render_cart_page, CartPageView, PageChrome};
use crate::summary::render_cart_summary;
use crate::variants::VariantRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// Catalog card clicked: open the product dialog on its first line.
    ShowProductDialog {
        product_id: i64,
        select_names: Vec<String>,
    },
    /// Variant picker changed; `None` is the "add new" entry.
    ChangeVariant {
        product_id: i64,
        select_names: Vec<String>,
        slot: Option<usize>,
    },
    /// Product dialog submitted.
    AddToCart {
        product: ProductDataset,
        quantity: String,
        text: String,
        options: Vec<OptionSelect>,
        slot: Option<usize>,
    },
    /// Cart line clicked.
    ShowEditDialog { slot: usize },
    /// Edit dialog submitted.
    EditLine {
        slot: usize,
        quantity: String,
        text: String,
    },
    CloneLine { slot: usize },
    /// Cart form submitted.
    Checkout,
}

impl From<LineAction> for CartEvent {
    fn from(action: LineAction) -> Self {
        match action {
            LineAction::Clone { slot } => CartEvent::CloneLine { slot },
            LineAction::Edit { slot } => CartEvent::ShowEditDialog { slot },
        }
    }
}

/// Parts of the page an event invalidated. Absent parts stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_dialog: Option<AddDialogState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_dialog: Option<EditDialogState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<ProductBadge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appended_line: Option<LineItemView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_line: Option<LineItemView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_slot: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome: Option<PageChrome>,
    /// Checkout submission payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<Vec<FormField>>,
    /// Summary text after the event; `None` clears it.
    pub summary: Option<String>,
}

pub struct CartSession<S: SessionStorage> {
    store: CartStore<S>,
    cfg: CartConfig,
}

impl<S: SessionStorage> CartSession<S> {
    pub fn new(storage: S, cfg: CartConfig) -> Self {
        let store = CartStore::with_key(storage, cfg.storage_key.clone());
        Self { store, cfg }
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn config(&self) -> &CartConfig {
        &self.cfg
    }

    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }

    pub fn cart(&self) -> Cart {
        self.store.load()
    }

    /// Cart page load: compact leftovers, then render every line.
    pub fn open_cart_page(&mut self) -> Result<CartPageView, CartError> {
        let cart = self.store.init()?;
        Ok(render_cart_page(&cart, &self.cfg))
    }

    /// End the session: the cart key is removed, not just emptied.
    pub fn forget(&mut self) -> Result<(), CartError> {
        self.store.forget()
    }

    /// Catalog page load.
    pub fn open_catalog(&mut self) -> Result<Vec<ProductBadge>, CartError> {
        let cart = self.store.init()?;
        Ok(render_catalog_badges(&cart))
    }

    pub fn handle(&mut self, event: CartEvent) -> Result<ViewUpdate, CartError> {
        debug!(?event, "cart event");
        match event {
            CartEvent::ShowProductDialog {
                product_id,
                select_names,
            } => Ok(self.product_dialog(product_id, &select_names, VariantRequest::First)),

            CartEvent::ChangeVariant {
                product_id,
                select_names,
                slot,
            } => {
                let request = slot.map_or(VariantRequest::New, VariantRequest::Slot);
                Ok(self.product_dialog(product_id, &select_names, request))
            }

            CartEvent::AddToCart {
                product,
                quantity,
                text,
                options,
                slot,
            } => {
                let form = FormState {
                    quantity: coerce_quantity(&quantity),
                    text,
                    options: Some(collect_options(&options)),
                };
                let outcome = self.store.upsert(&product, &form, slot)?;
                let request = outcome
                    .live_slot()
                    .map_or(VariantRequest::New, VariantRequest::Slot);
                let select_names: Vec<String> = options.into_iter().map(|s| s.name).collect();

                let mut update = self.product_dialog(product.id, &select_names, request);
                update.badge = Some(render_product_badge(&self.store.load(), product.id));
                Ok(update)
            }

            CartEvent::ShowEditDialog { slot } => {
                let cart = self.store.load();
                Ok(ViewUpdate {
                    edit_dialog: sync_edit_dialog(&cart, slot),
                    summary: render_cart_summary(&cart, &self.cfg),
                    ..ViewUpdate::default()
                })
            }

            CartEvent::EditLine {
                slot,
                quantity,
                text,
            } => {
                let outcome = self.store.edit(slot, coerce_quantity(&quantity), &text)?;
                let cart = self.store.load();
                let mut update = ViewUpdate {
                    chrome: Some(PageChrome::for_cart(&cart)),
                    summary: render_cart_summary(&cart, &self.cfg),
                    ..ViewUpdate::default()
                };
                match outcome {
                    UpsertOutcome::Updated { slot } | UpsertOutcome::Appended { slot } => {
                        update.updated_line = self.line(&cart, slot);
                    }
                    UpsertOutcome::Removed { slot } => update.removed_slot = Some(slot),
                    UpsertOutcome::Ignored => {}
                }
                Ok(update)
            }

            CartEvent::CloneLine { slot } => {
                let new_slot = self.store.clone_slot(slot)?;
                let cart = self.store.load();
                Ok(ViewUpdate {
                    appended_line: new_slot.and_then(|s| self.line(&cart, s)),
                    summary: render_cart_summary(&cart, &self.cfg),
                    ..ViewUpdate::default()
                })
            }

            CartEvent::Checkout => {
                let fields = checkout_fields(&self.store.load(), &self.cfg);
                self.store.reset()?;
                Ok(ViewUpdate {
                    submitted: Some(fields),
                    summary: None,
                    ..ViewUpdate::default()
                })
            }
        }
    }

    fn product_dialog(
        &self,
        product_id: i64,
        select_names: &[String],
        request: VariantRequest,
    ) -> ViewUpdate {
        let cart = self.store.load();
        ViewUpdate {
            add_dialog: Some(sync_add_dialog(
                &cart,
                product_id,
                select_names,
                request,
                &self.cfg,
            )),
            summary: render_cart_summary(&cart, &self.cfg),
            ..ViewUpdate::default()
        }
    }

    fn line(&self, cart: &Cart, slot: usize) -> Option<LineItemView> {
        cart.get(slot)
            .map(|item| render_line_item(slot, item, &self.cfg))
    }
}
