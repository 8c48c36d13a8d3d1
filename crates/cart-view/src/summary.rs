//! Cart summary line ("N позиции на сумму X").

use cart_config::{CartConfig, FormatConfig};
use cart_store::{Cart, Micros};

/// Money text with the configured decimals and thousands separator.
pub fn format_money(amount: Micros, format: &FormatConfig) -> String {
    amount.format_grouped(format.decimals, &format.thousands_separator)
}

/// `None` for an empty cart (the host clears the element), otherwise the
/// summary template filled with `{count}` and `{total}`.
pub fn render_cart_summary(cart: &Cart, cfg: &CartConfig) -> Option<String> {
    let count = cart.count();
    if count == 0 {
        return None;
    }
    let total = format_money(cart.total_value(), &cfg.format);
    Some(
        cfg.view
            .summary_template
            .replace("{count}", &count.to_string())
            .replace("{total}", &total),
    )
}
