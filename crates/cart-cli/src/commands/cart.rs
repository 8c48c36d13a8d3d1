//! Cart page commands: show, add, edit/remove, clone, summary, checkout.

use anyhow::{bail, Result};
use cart_schemas::{OptionSelect, ProductDataset};
use cart_view::{render_cart_summary, CartEvent, LineItemView};

use super::{opt, Session};

pub fn show(session: &mut Session, json: bool) -> Result<()> {
    let page = session.open_cart_page()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    for line in &page.items {
        print_line("line", line);
    }
    println!("lines={}", page.items.len());
    println!("summary={}", page.summary.unwrap_or_default());
    println!("submit_visible={}", page.chrome.submit_visible);
    println!("empty_alert_visible={}", page.chrome.empty_alert_visible);
    Ok(())
}

pub fn add(
    session: &mut Session,
    product: ProductDataset,
    quantity: String,
    text: String,
    options: &[String],
    slot: Option<usize>,
) -> Result<()> {
    let product_id = product.id;
    let options = parse_options(options)?;
    let update = session.handle(CartEvent::AddToCart {
        product,
        quantity,
        text,
        options,
        slot,
    })?;

    println!("product_id={product_id}");
    println!("slot={}", opt(update.add_dialog.and_then(|d| d.slot)));
    if let Some(badge) = update.badge {
        println!("in_cart={}", badge.quantity);
    }
    println!("summary={}", update.summary.unwrap_or_default());
    Ok(())
}

pub fn edit(session: &mut Session, slot: usize, quantity: String, text: String) -> Result<()> {
    let update = session.handle(CartEvent::EditLine {
        slot,
        quantity,
        text,
    })?;

    match (&update.updated_line, update.removed_slot) {
        (Some(line), _) => print_line("updated", line),
        (None, Some(removed)) => println!("removed_slot={removed}"),
        (None, None) => println!("unchanged_slot={slot}"),
    }
    if let Some(chrome) = update.chrome {
        println!("empty_alert_visible={}", chrome.empty_alert_visible);
    }
    println!("summary={}", update.summary.unwrap_or_default());
    Ok(())
}

pub fn clone(session: &mut Session, slot: usize) -> Result<()> {
    let update = session.handle(CartEvent::CloneLine { slot })?;
    match &update.appended_line {
        Some(line) => print_line("appended", line),
        None => println!("appended_slot=none"),
    }
    println!("summary={}", update.summary.unwrap_or_default());
    Ok(())
}

pub fn summary(session: &Session) {
    let cart = session.cart();
    println!("count={}", cart.count());
    println!("total={}", cart.total_value());
    println!(
        "summary={}",
        render_cart_summary(&cart, session.config()).unwrap_or_default()
    );
}

pub fn checkout(session: &mut Session) -> Result<()> {
    let update = session.handle(CartEvent::Checkout)?;
    for field in update.submitted.unwrap_or_default() {
        println!("{}={}", field.name, field.value);
    }
    println!("reset=true");
    Ok(())
}

pub fn forget(session: &mut Session) -> Result<()> {
    session.forget()?;
    println!("forgotten=true key={}", session.store().key());
    Ok(())
}

fn print_line(tag: &str, line: &LineItemView) {
    println!(
        "{tag} slot={} product_id={} sku={} quantity={} price={} cost={} name={}",
        line.slot,
        line.product_id,
        line.sku,
        line.quantity,
        line.price_text,
        line.cost_text,
        line.name
    );
    if let Some(note) = &line.note {
        println!("  note={note}");
    }
    if let Some(options) = &line.options {
        println!("  options={}", options.json);
    }
}

/// `NAME=VALUE` pairs into option selects.
fn parse_options(raw: &[String]) -> Result<Vec<OptionSelect>> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => Ok(OptionSelect {
                name: name.trim().to_string(),
                value: value.to_string(),
                disabled: false,
            }),
            _ => bail!("invalid --option '{pair}'. expected NAME=VALUE"),
        })
        .collect()
}
