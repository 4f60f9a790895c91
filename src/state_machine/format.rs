//! Display formatting for computed values
//!
//! Values are shown in their shortest round-trip form. When that does not fit
//! the display width, the value is rounded: fixed-point first, scientific
//! notation when the integer part is too wide or fixed-point would round the
//! value away entirely.

/// Format `value` to fit within `width` characters.
///
/// Zero (including negative zero) is always `"0"`. Non-finite values never
/// reach this function; the engine turns them into the error state first.
pub fn format_number(value: f64, width: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let shortest = value.to_string();
    if shortest.len() <= width {
        return shortest;
    }

    fixed_within(value, width).unwrap_or_else(|| scientific_within(value, width))
}

/// Widest fixed-point rendering that fits, or `None` if none fits or the
/// value would round to zero.
fn fixed_within(value: f64, width: usize) -> Option<String> {
    for decimals in (0..width).rev() {
        let candidate = trim_fraction(&format!("{value:.decimals$}"));
        if candidate.len() > width {
            continue;
        }
        let rounds_to_zero = candidate.parse::<f64>().map_or(true, |v| v == 0.0);
        return (!rounds_to_zero).then_some(candidate);
    }
    None
}

fn scientific_within(value: f64, width: usize) -> String {
    for precision in (0..width).rev() {
        let candidate = trim_mantissa(&format!("{value:.precision$e}"));
        if candidate.len() <= width {
            return candidate;
        }
    }
    format!("{value:.0e}")
}

/// Drop trailing fractional zeros, and the separator if nothing remains
fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

fn trim_mantissa(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
        None => trim_fraction(s),
    }
}
