//! Locale-style number formatting
//!
//! Values are rounded half away from zero to the requested number of decimals,
//! then the integer part is grouped by thousands.

use serde::{Deserialize, Serialize};

/// Above this many decimals an f64 has no meaningful digits left to round
const MAX_ROUNDING_DECIMALS: usize = 15;

/// Separators used when rendering a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub thousands_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            thousands_separator: ',',
        }
    }
}

impl NumberFormat {
    #[must_use]
    pub const fn new(decimal_separator: char, thousands_separator: char) -> Self {
        Self {
            decimal_separator,
            thousands_separator,
        }
    }
}

/// Round `value` to `decimals` places, ties going away from zero.
///
/// The scaled value is nudged by a few ulps first so inputs like `1.005`,
/// stored as `1.00499999...`, still round up at two decimals.
#[must_use]
pub fn round_half_away_from_zero(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() || decimals > MAX_ROUNDING_DECIMALS {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    let nudged = scaled + scaled.signum() * scaled.abs() * f64::EPSILON * 4.0;
    // f64::round already rounds ties away from zero
    nudged.round() / factor
}

/// Render `value` with fixed `decimals` and grouped thousands
#[must_use]
pub fn format_number(value: f64, decimals: usize, format: &NumberFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = round_half_away_from_zero(value, decimals);
    let digits = format!("{:.*}", decimals, rounded.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + integer.len() / 3 + 1);
    // Skip the sign when rounding produced zero, so -0.001 renders as "0.00"
    if rounded < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    let lead = match integer.len() % 3 {
        0 => 3,
        n => n,
    };
    let (head, mut rest) = integer.split_at(lead);
    out.push_str(head);
    while !rest.is_empty() {
        let (group, tail) = rest.split_at(3);
        out.push(format.thousands_separator);
        out.push_str(group);
        rest = tail;
    }
    if let Some(fraction) = fraction {
        out.push(format.decimal_separator);
        out.push_str(fraction);
    }
    out
}
