//! Catalog badges, variant picker and dialog view models.

use anyhow::Result;
use cart_view::{
    render_product_badge, render_variant_picker, sync_add_dialog, CartEvent, ProductBadge,
    VariantRequest,
};

use super::{opt, Session};

pub fn badge(session: &mut Session, product_id: Option<i64>) -> Result<()> {
    let badges = match product_id {
        Some(id) => vec![render_product_badge(&session.cart(), id)],
        None => session.open_catalog()?,
    };
    for b in &badges {
        print_badge(b);
    }
    Ok(())
}

fn print_badge(b: &ProductBadge) {
    println!(
        "product_id={} quantity={} highlight={} plus_visible={}",
        b.product_id, b.quantity, b.highlight, b.plus_visible
    );
}

fn request(slot: Option<usize>, new: bool) -> VariantRequest {
    match (slot, new) {
        (_, true) => VariantRequest::New,
        (Some(s), false) => VariantRequest::Slot(s),
        (None, false) => VariantRequest::First,
    }
}

pub fn variants(session: &Session, product_id: i64, slot: Option<usize>, new: bool) {
    let picker = render_variant_picker(
        &session.cart(),
        product_id,
        request(slot, new),
        session.config(),
    );
    println!("visible={}", picker.visible);
    println!("new_selected={}", picker.new_selected);
    for option in &picker.options {
        println!(
            "variant slot={} selected={} label={}",
            option.slot, option.selected, option.label
        );
    }
    println!("selected_slot={}", opt(picker.selected_slot));
}

pub fn product_dialog(
    session: &Session,
    product_id: i64,
    selects: &[String],
    slot: Option<usize>,
) -> Result<()> {
    let state = sync_add_dialog(
        &session.cart(),
        product_id,
        selects,
        request(slot, false),
        session.config(),
    );
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

pub fn line_dialog(session: &mut Session, slot: usize) -> Result<()> {
    let update = session.handle(CartEvent::ShowEditDialog { slot })?;
    match update.edit_dialog {
        Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
        None => println!("edit_dialog=none slot={slot}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_flag_wins_over_slot() {
        assert_eq!(request(Some(2), true), VariantRequest::New);
        assert_eq!(request(Some(2), false), VariantRequest::Slot(2));
        assert_eq!(request(None, false), VariantRequest::First);
    }
}
