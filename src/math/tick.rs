/*
 * Fixed-point tick math: tick <-> Q64.96 sqrt price ratio, and prices
 */

use super::decimal::{biguint_to_u256, divide_big_int_to_string, pow10, u256_to_biguint};
use crate::models::{Result, TickscopeError};
use ethers::types::U256;
use num_bigint::BigUint;
use num_traits::Zero;
use tracing::debug;

pub const MIN_TICK: i32 = -887_272;
pub const MAX_TICK: i32 = -MIN_TICK;

/// Fractional digits carried by price strings.
pub const PRICE_DECIMALS: usize = 18;

/// Sqrt ratio at `MIN_TICK`.
pub const MIN_SQRT_RATIO: U256 = U256([4_295_128_739, 0, 0, 0]);

/// Sqrt ratio at `MAX_TICK`, 1461446703485210103287273052203988822378723970342.
pub const MAX_SQRT_RATIO: U256 = U256([0x5d95_1d52_6398_8d26, 0xefd1_fc6a_5064_8849, 0xfffd_8963, 0]);

/// Q128 value of 1.0001^(-1/2), used when bit 0x1 of |tick| is set.
const BIT_0_RATIO: u128 = 0xfffc_b933_bd6f_ad37_aa2d_162d_1a59_4001;

/// Q128 values of 1.0001^(-2^k / 2) for bit positions 0x2 through 0x80000.
const RATIO_MULTIPLIERS: [u128; 19] = [
    0xfff9_7272_373d_4132_59a4_6990_580e_213a,
    0xfff2_e50f_5f65_6932_ef12_357c_f3c7_fdcc,
    0xffe5_caca_7e10_e4e6_1c36_24ea_a094_1cd0,
    0xffcb_9843_d60f_6159_c9db_5883_5c92_6644,
    0xff97_3b41_fa98_c081_472e_6896_dfb2_54c0,
    0xff2e_a164_66c9_6a38_43ec_78b3_26b5_2861,
    0xfe5d_ee04_6a99_a2a8_11c4_61f1_969c_3053,
    0xfcbe_86c7_900a_88ae_dcff_c83b_479a_a3a4,
    0xf987_a725_3ac4_1317_6f2b_074c_f781_5e54,
    0xf339_2b08_22b7_0005_940c_7a39_8e4b_70f3,
    0xe715_9475_a2c2_9b74_43b2_9c7f_a6e8_89d9,
    0xd097_f3bd_fd20_22b8_845a_d8f7_92aa_5825,
    0xa9f7_4646_2d87_0fdf_8a65_dc1f_90e0_61e5,
    0x70d8_69a1_56d2_a1b8_90bb_3df6_2baf_32f7,
    0x31be_135f_97d0_8fd9_8123_1505_542f_cfa6,
    0x09aa_508b_5b7a_84e1_c677_de54_f3e9_9bc9,
    0x005d_6af8_dedb_8119_6699_c329_225e_e604,
    0x0000_2216_e584_f5fa_1ea9_2604_1bed_fe98,
    0x0000_0000_048a_1703_91f7_dc42_444e_8fa2,
];

#[must_use]
pub fn q96() -> U256 {
    U256::one() << 96
}

/// Returns sqrt(1.0001^tick) * 2^96, bit-for-bit with the on-chain TickMath.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(TickscopeError::TickOutOfBounds(tick));
    }

    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(BIT_0_RATIO)
    } else {
        U256::one() << 128
    };

    for (bit, multiplier) in RATIO_MULTIPLIERS.iter().enumerate() {
        if abs_tick & (0x2 << bit) != 0 {
            ratio = mul_shift(ratio, *multiplier);
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128 -> Q96, rounded up
    let remainder_mask = (U256::one() << 32) - U256::one();
    let round_up = if (ratio & remainder_mask).is_zero() {
        U256::zero()
    } else {
        U256::one()
    };

    Ok((ratio >> 32) + round_up)
}

// ratio <= 2^128 and every multiplier < 2^128, so the product stays inside 256 bits
fn mul_shift(ratio: U256, multiplier: u128) -> U256 {
    (ratio * U256::from(multiplier)) >> 128
}

/// Returns the greatest tick whose sqrt ratio is less than or equal to `sqrt_ratio_x96`.
pub fn get_tick_at_sqrt_ratio(sqrt_ratio_x96: U256) -> Result<i32> {
    if sqrt_ratio_x96 < MIN_SQRT_RATIO || sqrt_ratio_x96 >= MAX_SQRT_RATIO {
        return Err(TickscopeError::SqrtRatioOutOfBounds(sqrt_ratio_x96.to_string()));
    }

    // ratio(low) <= sqrt_ratio_x96 < ratio(high)
    let (mut low, mut high) = (MIN_TICK, MAX_TICK);
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        if get_sqrt_ratio_at_tick(mid)? <= sqrt_ratio_x96 {
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(low)
}

/// Price of the base token in quote-token units for a pool sqrt price.
///
/// `base_decimals` belongs to token0 and `quote_decimals` to token1; `revert`
/// returns the reciprocal (token1 priced in token0).
pub fn sqrt_price_to_price(
    sqrt_ratio_x96: U256,
    base_decimals: u8,
    quote_decimals: u8,
    revert: bool,
) -> Result<String> {
    let ratio_x192 = u256_to_biguint(sqrt_ratio_x96).pow(2);
    let numerator = ratio_x192 * pow10(u32::from(base_decimals));
    let denominator = (BigUint::from(1u32) << 192u32) * pow10(u32::from(quote_decimals));

    if revert {
        divide_big_int_to_string(&denominator, &numerator, PRICE_DECIMALS)
    } else {
        divide_big_int_to_string(&numerator, &denominator, PRICE_DECIMALS)
    }
}

pub fn tick_to_price(tick: i32, base_decimals: u8, quote_decimals: u8, revert: bool) -> Result<String> {
    let sqrt_ratio_x96 = get_sqrt_ratio_at_tick(tick)?;
    sqrt_price_to_price(sqrt_ratio_x96, base_decimals, quote_decimals, revert)
}

/// Inverse of [`tick_to_price`]: the tick whose price is nearest to `price`.
///
/// Prices beyond the representable range clamp to `MIN_TICK` / `MAX_TICK`.
pub fn price_to_closest_tick(price: &str, base_decimals: u8, quote_decimals: u8) -> Result<i32> {
    let (mantissa, scale) = parse_decimal(price)?;
    if mantissa.is_zero() {
        return Err(TickscopeError::ParseError(format!(
            "price must be positive: {price}"
        )));
    }

    // sqrt^2 = price * 2^192 * 10^quote / 10^base
    let numerator = (mantissa << 192u32) * pow10(u32::from(quote_decimals));
    let denominator = pow10(scale) * pow10(u32::from(base_decimals));
    let sqrt_ratio = (numerator / denominator).sqrt();

    if sqrt_ratio.bits() > 160 {
        return Ok(MAX_TICK);
    }
    let sqrt_ratio_x96 = biguint_to_u256(&sqrt_ratio)?;
    if sqrt_ratio_x96 < MIN_SQRT_RATIO {
        return Ok(MIN_TICK);
    }
    if sqrt_ratio_x96 >= MAX_SQRT_RATIO {
        return Ok(MAX_TICK);
    }

    let tick = get_tick_at_sqrt_ratio(sqrt_ratio_x96)?;
    let lower_distance = sqrt_ratio_x96 - get_sqrt_ratio_at_tick(tick)?;
    let upper_distance = get_sqrt_ratio_at_tick(tick + 1)? - sqrt_ratio_x96;

    let closest = if upper_distance < lower_distance {
        tick + 1
    } else {
        tick
    };
    debug!(price, closest, "resolved price to tick");
    Ok(closest)
}

/// Rounds `tick` to the nearest multiple of `tick_spacing` that is still in bounds.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> Result<i32> {
    if tick_spacing <= 0 || tick_spacing > MAX_TICK {
        return Err(TickscopeError::CalculationError(format!(
            "tick spacing must be within 1..={MAX_TICK}, got {tick_spacing}"
        )));
    }
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(TickscopeError::TickOutOfBounds(tick));
    }

    // Halves round toward positive infinity
    let rounded = (tick * 2 + tick_spacing).div_euclid(tick_spacing * 2) * tick_spacing;

    if rounded < MIN_TICK {
        Ok(rounded + tick_spacing)
    } else if rounded > MAX_TICK {
        Ok(rounded - tick_spacing)
    } else {
        Ok(rounded)
    }
}

// "12.345" -> (12345, 3)
fn parse_decimal(value: &str) -> Result<(BigUint, u32)> {
    let value = value.trim();
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    let digits = format!("{whole}{fraction}");

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TickscopeError::ParseError(format!("invalid decimal: {value:?}")));
    }

    let mantissa = BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| TickscopeError::ParseError(format!("invalid decimal: {value:?}")))?;
    let scale = u32::try_from(fraction.len())
        .map_err(|e| TickscopeError::ParseError(format!("decimal too long: {e}")))?;

    Ok((mantissa, scale))
}
