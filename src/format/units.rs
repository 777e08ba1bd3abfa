/*
 * Raw integer amounts <-> decimal unit strings
 */

use crate::math::decimal::{biguint_to_u256, pow10, u256_to_biguint};
use crate::models::{Result, TickscopeError};
use ethers::types::U256;
use num_bigint::BigUint;

pub(crate) fn is_raw_amount(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Splits `value` into whole and zero-padded fractional digit strings.
pub(crate) fn split_units(value: &BigUint, decimals: u8) -> (String, String) {
    let divisor = pow10(u32::from(decimals));
    let whole = value / &divisor;
    let fraction = value % &divisor;
    let fraction = format!("{:0>width$}", fraction.to_string(), width = usize::from(decimals));
    (whole.to_string(), fraction)
}

pub(crate) fn join_units(whole: String, fraction: &str, max_decimals: Option<usize>) -> String {
    let fraction = match max_decimals {
        Some(max) => &fraction[..fraction.len().min(max)],
        None => fraction,
    };
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Renders a raw on-chain amount in token units, e.g. `1500000` with 6 decimals is `"1.5"`.
#[must_use]
pub fn to_raw_string(amount: U256, decimals: u8) -> String {
    let (whole, fraction) = split_units(&u256_to_biguint(amount), decimals);
    join_units(whole, &fraction, None)
}

/// Parses a decimal token amount into raw units. Strict: more fractional
/// digits than `decimals` is an error rather than a silent truncation.
pub fn parse_units(value: &str, decimals: u8) -> Result<U256> {
    let value = value.trim();
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));

    let valid = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !valid(whole) || !valid(fraction) {
        return Err(TickscopeError::ParseError(format!("invalid amount: {value:?}")));
    }
    if fraction.len() > usize::from(decimals) {
        return Err(TickscopeError::ParseError(format!(
            "{value} has more than {decimals} fractional digits"
        )));
    }

    let digits = format!(
        "{whole}{fraction:0<width$}",
        width = usize::from(decimals)
    );
    let raw = BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| TickscopeError::ParseError(format!("invalid amount: {value:?}")))?;

    biguint_to_u256(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_string_drops_empty_fraction() {
        assert_eq!(to_raw_string(U256::exp10(18), 18), "1");
        assert_eq!(to_raw_string(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(to_raw_string(U256::from(42u64), 0), "42");
        assert_eq!(to_raw_string(U256::from(1u64), 18), "0.000000000000000001");
    }

    #[test]
    fn parse_units_scales_by_decimals() {
        assert_eq!(parse_units("1.5", 6).unwrap(), U256::from(1_500_000u64));
        assert_eq!(parse_units("0.000001", 6).unwrap(), U256::one());
        assert_eq!(parse_units(".5", 1).unwrap(), U256::from(5u64));
        assert_eq!(parse_units("7", 0).unwrap(), U256::from(7u64));
    }

    #[test]
    fn parse_units_rejects_excess_precision() {
        assert!(parse_units("0.0000001", 6).is_err());
        assert!(parse_units("1.2.3", 6).is_err());
        assert!(parse_units("-1", 6).is_err());
        assert!(parse_units(".", 6).is_err());
    }

    #[test]
    fn join_truncates_before_stripping() {
        assert_eq!(join_units("1".to_string(), "230045", Some(3)), "1.23");
        assert_eq!(join_units("1".to_string(), "000045", Some(3)), "1");
    }
}
