/*
 * Concentrated-liquidity amount deltas and position composition
 */

use super::tick::get_sqrt_ratio_at_tick;
use crate::models::{PositionAmounts, Result, TickscopeError};
use ethers::types::{U256, U512};
use tracing::debug;

fn sorted(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> (U256, U256) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

fn div_rounding(numerator: U512, denominator: U512, round_up: bool) -> Result<U256> {
    if denominator.is_zero() {
        return Err(TickscopeError::DivisionByZero);
    }
    let (quotient, remainder) = numerator.div_mod(denominator);
    let quotient = if round_up && !remainder.is_zero() {
        quotient + U512::one()
    } else {
        quotient
    };
    U256::try_from(quotient)
        .map_err(|_| TickscopeError::CalculationError("amount exceeds 256 bits".to_string()))
}

fn overflow(operation: &str) -> TickscopeError {
    TickscopeError::CalculationError(format!("overflow in {operation}"))
}

/// amount0 = liquidity * (sqrtB - sqrtA) * 2^96 / (sqrtB * sqrtA)
pub fn get_amount0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    round_up: bool,
) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    let numerator = (U512::from(liquidity) << 96)
        .checked_mul(U512::from(upper - lower))
        .ok_or_else(|| overflow("get_amount0_delta"))?;
    let denominator = U512::from(upper) * U512::from(lower);

    div_rounding(numerator, denominator, round_up)
}

/// amount1 = liquidity * (sqrtB - sqrtA) / 2^96
pub fn get_amount1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    round_up: bool,
) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    let numerator = U512::from(liquidity)
        .checked_mul(U512::from(upper - lower))
        .ok_or_else(|| overflow("get_amount1_delta"))?;

    div_rounding(numerator, U512::one() << 96, round_up)
}

/// Token amounts held by a position, rounded down.
///
/// The lower tick is inclusive and the upper tick exclusive: a pool sitting
/// exactly on `tick_lower` counts as in range, one sitting on `tick_upper`
/// counts as above it.
pub fn get_position_amounts(
    tick_current: i32,
    tick_lower: i32,
    tick_upper: i32,
    sqrt_ratio_x96: U256,
    liquidity: U256,
) -> Result<PositionAmounts> {
    let sqrt_ratio_lower = get_sqrt_ratio_at_tick(tick_lower)?;
    let sqrt_ratio_upper = get_sqrt_ratio_at_tick(tick_upper)?;

    let amounts = if tick_current < tick_lower {
        PositionAmounts {
            amount0: get_amount0_delta(sqrt_ratio_lower, sqrt_ratio_upper, liquidity, false)?,
            amount1: U256::zero(),
        }
    } else if tick_current < tick_upper {
        PositionAmounts {
            amount0: get_amount0_delta(sqrt_ratio_x96, sqrt_ratio_upper, liquidity, false)?,
            amount1: get_amount1_delta(sqrt_ratio_lower, sqrt_ratio_x96, liquidity, false)?,
        }
    } else {
        PositionAmounts {
            amount0: U256::zero(),
            amount1: get_amount1_delta(sqrt_ratio_lower, sqrt_ratio_upper, liquidity, false)?,
        }
    };

    debug!(
        tick_current,
        tick_lower,
        tick_upper,
        amount0 = %amounts.amount0,
        amount1 = %amounts.amount1,
        "computed position amounts"
    );

    Ok(amounts)
}

fn liquidity_for_amount0(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256, amount0: U256) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    // amount0 * (sqrtA * sqrtB / 2^96) / (sqrtB - sqrtA)
    let intermediate = (U512::from(lower) * U512::from(upper)) >> 96;
    let numerator = U512::from(amount0)
        .checked_mul(intermediate)
        .ok_or_else(|| overflow("liquidity_for_amount0"))?;
    div_rounding(numerator, U512::from(upper - lower), false)
}

fn liquidity_for_amount1(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256, amount1: U256) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let numerator = U512::from(amount1) << 96;
    div_rounding(numerator, U512::from(upper - lower), false)
}

/// Largest liquidity that the given token amounts can fund for a price range.
pub fn get_liquidity_for_amounts(
    sqrt_ratio_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
    amount1: U256,
) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_x96 <= lower {
        liquidity_for_amount0(lower, upper, amount0)
    } else if sqrt_ratio_x96 < upper {
        let liquidity0 = liquidity_for_amount0(sqrt_ratio_x96, upper, amount0)?;
        let liquidity1 = liquidity_for_amount1(lower, sqrt_ratio_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        liquidity_for_amount1(lower, upper, amount1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick::q96;

    fn liquidity() -> U256 {
        U256::exp10(18)
    }

    #[test]
    fn deltas_are_order_independent() {
        let a = get_sqrt_ratio_at_tick(-60).unwrap();
        let b = get_sqrt_ratio_at_tick(60).unwrap();
        assert_eq!(
            get_amount0_delta(a, b, liquidity(), false).unwrap(),
            get_amount0_delta(b, a, liquidity(), false).unwrap()
        );
        assert_eq!(
            get_amount1_delta(a, b, liquidity(), false).unwrap(),
            get_amount1_delta(b, a, liquidity(), false).unwrap()
        );
    }

    #[test]
    fn round_up_adds_at_most_one() {
        let upper = get_sqrt_ratio_at_tick(60).unwrap();
        let down = get_amount0_delta(q96(), upper, liquidity(), false).unwrap();
        let up = get_amount0_delta(q96(), upper, liquidity(), true).unwrap();
        assert_eq!(down, U256::from(2_995_354_955_910_780u64));
        assert_eq!(up, down + U256::one());
    }

    #[test]
    fn equal_ratios_yield_zero() {
        assert!(get_amount1_delta(q96(), q96(), liquidity(), false).unwrap().is_zero());
        assert!(get_amount0_delta(q96(), q96(), liquidity(), false).unwrap().is_zero());
    }

    #[test]
    fn zero_sqrt_ratio_cannot_price_token0() {
        let result = get_amount0_delta(U256::zero(), q96(), liquidity(), false);
        assert!(matches!(result, Err(TickscopeError::DivisionByZero)));
    }

    #[test]
    fn oversized_liquidity_reports_overflow() {
        let result = get_amount1_delta(U256::one(), U256::MAX, U256::MAX, false);
        assert!(result.is_err());
    }

    #[test]
    fn liquidity_for_amounts_reproduces_position() {
        let lower = get_sqrt_ratio_at_tick(-60).unwrap();
        let upper = get_sqrt_ratio_at_tick(60).unwrap();
        let amounts = get_position_amounts(0, -60, 60, q96(), liquidity()).unwrap();

        let recovered =
            get_liquidity_for_amounts(q96(), lower, upper, amounts.amount0, amounts.amount1).unwrap();

        assert!(recovered <= liquidity());
        assert!(liquidity() - recovered < U256::from(1_000u64));
    }
}
