//! Price and tooltip formatting.

/// Group the integer part of a non-negative number with commas.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a number with thousands separators and at most two decimals.
///
/// Whole values get no decimal part; fractional values keep up to two
/// digits with trailing zeros dropped (`1234.5` -> `1,234.5`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc();
    let frac = (cents - whole * 100.0) as u64;

    let mut out = String::new();
    if value < 0.0 && cents > 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(&format!("{whole:.0}")));
    if frac > 0 {
        let decimals = format!("{frac:02}");
        out.push('.');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}

/// Format a dollar amount: `$` prefix, thousands separators.
///
/// `12345.0` formats as `$12,345`.
#[must_use]
pub fn format_price(value: f64) -> String {
    let number = format_number(value);
    match number.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${number}"),
    }
}

/// Format a tooltip value: prices get currency formatting, anything else
/// is shown as-is.
#[must_use]
pub fn format_tooltip(name: &str, value: f64, is_price: bool) -> String {
    if is_price {
        format!("{name}: {}", format_price(value))
    } else {
        format!("{name}: {value}")
    }
}

/// Display size of a formatted price, shrinking as the number grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSize {
    /// Up to seven digits and commas (`999,999`).
    Large,
    /// Up to nine (`9,999,999`).
    Medium,
    /// Anything longer.
    Small,
}

impl PriceSize {
    /// Tier for a price, from the visual length of its formatted number.
    #[must_use]
    pub fn for_price(value: f64) -> Self {
        let visual_len = format_number(value)
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ',')
            .count();
        match visual_len {
            0..=7 => Self::Large,
            8..=9 => Self::Medium,
            _ => Self::Small,
        }
    }

    /// Font size in pixels for SVG/HTML output.
    #[must_use]
    pub fn font_px(self) -> f32 {
        match self {
            Self::Large => 72.0,
            Self::Medium => 60.0,
            Self::Small => 48.0,
        }
    }
}
