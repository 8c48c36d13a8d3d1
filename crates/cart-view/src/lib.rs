//! cart-view
//!
//! Data projections of the session cart onto the storefront markup.
//! - Line items, summary text, variant picker, add/edit dialogs
//! - Catalog "already in cart" badges and cart page chrome
//! - `CartSession`: event handlers that mutate through `CartStore` and
//!   return what the host has to re-render
//! - Project cookie helper (independent of the cart)
//!
//! Nothing here touches a DOM. View models are plain serde structs; the
//! host binds them to its own elements.

mod catalog;
mod dialog;
mod handlers;
mod line_item;
mod page;
mod project;
mod summary;
mod variants;

pub use catalog::{render_catalog_badges, render_product_badge, ProductBadge};
pub use dialog::{
    sync_add_dialog, sync_edit_dialog, AddDialogState, EditDialogState, ReadOnlyOption,
    SelectValue, UNSELECTED_OPTION,
};
pub use handlers::{CartEvent, CartSession, ViewUpdate};
pub use line_item::{fill_field_name, render_line_item, LineAction, LineItemView, OptionsRow};
pub use page::{checkout_fields, render_cart_page, CartPageView, PageChrome};
pub use project::{
    check_project, reset_cookies, ProjectCheck, PROJECT_ID_COOKIE, PROJECT_NAME_COOKIE,
};
pub use summary::{format_money, render_cart_summary};
pub use variants::{
    render_variant_picker, variant_label, VariantOption, VariantPicker, VariantRequest,
};
