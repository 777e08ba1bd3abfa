/*
 * Uniswap V3 style fixed-point math: ticks, sqrt prices, liquidity amounts
 */

pub mod decimal;
pub mod liquidity;
pub mod tick;

pub use decimal::divide_big_int_to_string;
pub use liquidity::{
    get_amount0_delta, get_amount1_delta, get_liquidity_for_amounts, get_position_amounts,
};
pub use tick::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, nearest_usable_tick, price_to_closest_tick,
    q96, sqrt_price_to_price, tick_to_price, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK,
};
