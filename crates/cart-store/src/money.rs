//! Fixed-point money type.
//!
//! Prices arrive as JSON numbers (`f64`) because that is how the cart is
//! stored. Summing floats drifts (`0.1 * 3 != 0.3`), so every amount is
//! converted to `Micros` (1e-6 scale, `i64`) before any arithmetic and only
//! converted back to text for display.
//!
//! There is no `From<i64>`; a raw integer becomes money only through
//! [`Micros::new`] or [`Micros::from_price`].

/// Micros per currency unit.
pub const MICROS_SCALE: i64 = 1_000_000;

/// A monetary amount at 1e-6 scale.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micros(i64);

impl Micros {
    pub const ZERO: Micros = Micros(0);
    pub const MAX: Micros = Micros(i64::MAX);

    #[inline]
    pub const fn new(raw: i64) -> Self {
        Micros(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Convert a decimal unit price to micros, rounding half away from zero.
    ///
    /// Non-finite input (NaN from a malformed dataset attribute) is zero.
    /// Out-of-range values saturate.
    pub fn from_price(price: f64) -> Self {
        if !price.is_finite() {
            return Micros::ZERO;
        }
        Micros((price * MICROS_SCALE as f64).round() as i64)
    }

    #[inline]
    pub fn saturating_add(self, rhs: Micros) -> Micros {
        Micros(self.0.saturating_add(rhs.0))
    }

    /// Unit price × integer quantity, clamped at the `i64` bounds.
    #[inline]
    pub fn saturating_mul_qty(self, qty: i64) -> Micros {
        Micros(self.0.saturating_mul(qty))
    }

    /// Render with `decimals` fraction digits (at most 6) and the integer
    /// part grouped by three with `separator`.
    ///
    /// Rounds half away from zero at the last shown digit.
    ///
    /// ```ignore
    /// assert_eq!(Micros::new(1_234_567_890_000).format_grouped(2, " "), "1 234 567.89");
    /// ```
    pub fn format_grouped(self, decimals: u32, separator: &str) -> String {
        let decimals = decimals.min(6);
        let unit = 10_i128.pow(6 - decimals);
        let raw = self.0 as i128;
        let rounded = (raw.abs() + unit / 2) / unit;
        let scale = 10_i128.pow(decimals);
        let whole = (rounded / scale).to_string();
        let frac = rounded % scale;

        let mut out = String::with_capacity(whole.len() * 2 + decimals as usize + 2);
        if raw < 0 && rounded != 0 {
            out.push('-');
        }
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                out.push_str(separator);
            }
            out.push(ch);
        }
        if decimals > 0 {
            out.push('.');
            out.push_str(&format!("{:0width$}", frac, width = decimals as usize));
        }
        out
    }
}

impl std::iter::Sum for Micros {
    fn sum<I: Iterator<Item = Micros>>(iter: I) -> Micros {
        iter.fold(Micros::ZERO, Micros::saturating_add)
    }
}

/// Two decimals, no grouping (`1234.50`).
impl std::fmt::Display for Micros {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_grouped(2, ""))
    }
}
