/*
 * Human display of floating-point quantities: grouping, compact suffixes
 * and subscript notation for very small values
 */

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

const COMPACT_UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

// Below Decimal::MAX (~7.9e28) with headroom for rounding
const DECIMAL_LIMIT: f64 = 1e27;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    #[default]
    Decimal,
    Currency,
    Percent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    #[serde(default)]
    pub style: DisplayStyle,
    pub significant_digits: Option<u32>,
    pub fraction_digits: Option<u32>,
    pub fallback: Option<String>,
}

impl DisplayOptions {
    #[must_use]
    pub fn style(style: DisplayStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn significant(digits: u32) -> Self {
        Self {
            significant_digits: Some(digits),
            ..Self::default()
        }
    }
}

#[must_use]
pub fn to_subscript(value: usize) -> String {
    value
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| SUBSCRIPT_DIGITS[d as usize])
        .collect()
}

pub(crate) fn decorate(body: &str, style: DisplayStyle, negative: bool) -> String {
    let sign = if negative { "-" } else { "" };
    match style {
        DisplayStyle::Decimal => format!("{sign}{body}"),
        DisplayStyle::Currency => format!("{sign}${body}"),
        DisplayStyle::Percent => format!("{sign}{body}%"),
    }
}

fn round_significant(value: Decimal, digits: u32) -> Option<Decimal> {
    value
        .round_sf_with_strategy(digits.max(1), RoundingStrategy::MidpointAwayFromZero)
        .map(|d| d.normalize())
}

/// Formats `0 < value < 1` by counting the zeros after the decimal point.
/// With `subscript_min_zeros` or more of them the zeros collapse to `0.0₆1234`.
pub(crate) fn format_small(value: f64, digit_limit: u32, subscript_min_zeros: usize) -> Option<String> {
    let repr = value.to_string();
    let (_, fraction) = repr.split_once('.')?;
    let significant = fraction.trim_start_matches('0');
    let leading_zeros = fraction.len() - significant.len();

    let mantissa = Decimal::from_str(&format!("0.{significant}")).ok()?;
    let rounded = round_significant(mantissa, digit_limit)?;

    let (leading_zeros, digits) = if rounded >= Decimal::ONE {
        // 0.0999.. rounded up to 0.1
        if leading_zeros == 0 {
            return Some("1".to_string());
        }
        (leading_zeros - 1, "1".to_string())
    } else {
        let text = rounded.to_string();
        let (_, digits) = text.split_once('.')?;
        (leading_zeros, digits.to_string())
    };

    if leading_zeros >= subscript_min_zeros {
        Some(format!("0.0{}{digits}", to_subscript(leading_zeros)))
    } else {
        Some(format!("0.{}{digits}", "0".repeat(leading_zeros)))
    }
}

/// Formats a non-negative magnitude with thousands separators, switching to
/// K/M/B/T suffixes at `compact_threshold`.
pub(crate) fn format_general(
    magnitude: f64,
    significant_digits: u32,
    fraction_digits: Option<u32>,
    compact_threshold: f64,
) -> Option<String> {
    if magnitude == 0.0 {
        return Some("0".to_string());
    }

    let (scaled, suffix) = if magnitude >= compact_threshold {
        COMPACT_UNITS
            .iter()
            .find(|(unit, _)| magnitude >= *unit)
            .map_or((magnitude, ""), |(unit, suffix)| (magnitude / unit, *suffix))
    } else {
        (magnitude, "")
    };

    if scaled >= DECIMAL_LIMIT {
        let digits = expand_large(scaled, significant_digits, fraction_digits)?;
        return Some(format!("{}{suffix}", group_thousands(&digits)));
    }

    let decimal = Decimal::from_str(&scaled.to_string()).ok()?;
    let rounded = match fraction_digits {
        Some(dp) => decimal
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
            .normalize(),
        None => round_significant(decimal, significant_digits)?,
    };

    Some(format!("{}{suffix}", group_thousands(&rounded.to_string())))
}

/// Integer digits of a value too wide for `Decimal`. Rounding happens on the
/// scientific mantissa; the exponent is restored with trailing zeros.
fn expand_large(value: f64, significant_digits: u32, fraction_digits: Option<u32>) -> Option<String> {
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e')?;
    let exponent: usize = exponent.parse().ok()?;

    let mantissa = Decimal::from_str(mantissa).ok()?;
    // Fraction digits never cut into an integer this wide
    let mantissa = match fraction_digits {
        Some(_) => mantissa.normalize(),
        None => round_significant(mantissa, significant_digits)?,
    };

    let text = mantissa.to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((&text, ""));
    let zeros = exponent.checked_sub(fraction.len())?;

    Some(format!("{integer}{fraction}{}", "0".repeat(zeros)))
}

fn group_thousands(number: &str) -> String {
    let (integer, fraction) = match number.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (number, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{grouped}.{fraction}"),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscript_maps_every_digit() {
        assert_eq!(to_subscript(6), "₆");
        assert_eq!(to_subscript(1234567890), "₁₂₃₄₅₆₇₈₉₀");
    }

    #[test]
    fn grouping_inserts_commas() {
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1000"), "1,000");
    }

    #[test]
    fn small_values_carry_rounding_into_zeros() {
        assert_eq!(format_small(0.0999999999, 2, 4).unwrap(), "0.1");
        assert_eq!(format_small(0.999999999, 2, 4).unwrap(), "1");
        assert_eq!(format_small(0.00000999999, 2, 4).unwrap(), "0.0₄1");
    }

    #[test]
    fn general_path_prefers_fraction_digits() {
        assert_eq!(format_general(1234.5678, 8, Some(2), 1e7).unwrap(), "1,234.57");
        assert_eq!(format_general(1234.5678, 3, None, 1e7).unwrap(), "1,230");
    }

    #[test]
    fn general_path_expands_values_beyond_decimal_range() {
        assert_eq!(expand_large(1e33, 8, None).unwrap(), format!("1{}", "0".repeat(33)));
        assert_eq!(expand_large(1.23456e30, 3, None).unwrap(), format!("123{}", "0".repeat(28)));
        assert_eq!(expand_large(9.99999e30, 2, None).unwrap(), format!("1{}", "0".repeat(31)));
        assert_eq!(
            format_general(1e45, 8, None, 1e7).unwrap(),
            format!("1{}T", ",000".repeat(11))
        );
        assert_eq!(
            format_general(1.5e50, 4, None, 1e7).unwrap(),
            format!("150{}T", ",000".repeat(12))
        );
    }
}
