/*
 * Big-integer helpers: exact decimal division and U256 <-> BigUint bridging
 */

use crate::models::{Result, TickscopeError};
use ethers::types::U256;
use num_bigint::BigUint;
use num_traits::Zero;

/// Long-divides `numerator / denominator` into a decimal string with at most
/// `decimal_places` fractional digits. Digits past that are truncated and
/// trailing zeros are dropped.
pub fn divide_big_int_to_string(
    numerator: &BigUint,
    denominator: &BigUint,
    decimal_places: usize,
) -> Result<String> {
    if denominator.is_zero() {
        return Err(TickscopeError::DivisionByZero);
    }

    let integer = numerator / denominator;
    let mut remainder = numerator % denominator;
    let mut fraction = String::with_capacity(decimal_places);

    for _ in 0..decimal_places {
        if remainder.is_zero() {
            break;
        }
        remainder *= 10u32;
        let digit = &remainder / denominator;
        remainder %= denominator;
        fraction.push_str(&digit.to_string());
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        Ok(integer.to_string())
    } else {
        Ok(format!("{integer}.{fraction}"))
    }
}

#[must_use]
pub fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}

#[must_use]
pub fn u256_to_biguint(value: U256) -> BigUint {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

pub fn biguint_to_u256(value: &BigUint) -> Result<U256> {
    if value.bits() > 256 {
        return Err(TickscopeError::CalculationError(format!(
            "{value} does not fit in 256 bits"
        )));
    }
    Ok(U256::from_big_endian(&value.to_bytes_be()))
}
