/*
 * NonfungiblePositionManager position struct decoding
 */

use super::{
    decode_address, decode_int24, decode_int24_word, decode_uint, encode_call, strip_hex_prefix,
    word_at, WORD_HEX_LEN,
};
use crate::models::{Result, TickscopeError};
use ethers::types::U256;

pub const POSITIONS_SIGNATURE: &str = "positions(uint256)";

/// Return data of `positions(uint256)`: twelve 32-byte slots.
pub const POSITION_HEX_LEN: usize = 12 * WORD_HEX_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPosition {
    pub nonce: U256,
    pub operator: String,
    pub token0: String,
    pub token1: String,
    pub fee: u32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: U256,
    pub fee_growth_inside0_last_x128: U256,
    pub fee_growth_inside1_last_x128: U256,
    pub tokens_owed0: U256,
    pub tokens_owed1: U256,
}

/// `eth_call` data reading the position stored under `token_id`.
#[must_use]
pub fn positions_call(token_id: U256) -> String {
    encode_call(POSITIONS_SIGNATURE, &[token_id])
}

/// Decodes the fields in struct order from their fixed slot offsets.
pub fn decode_position(raw: &str) -> Result<RawPosition> {
    let data = strip_hex_prefix(raw);
    if data.len() < POSITION_HEX_LEN {
        return Err(TickscopeError::DecodeError(format!(
            "positions() data must be {POSITION_HEX_LEN} hex chars, got {}",
            data.len()
        )));
    }

    let slot = |index: usize| word_at(data, index);

    Ok(RawPosition {
        nonce: decode_uint(slot(0)?)?,
        operator: decode_address(slot(1)?)?,
        token0: decode_address(slot(2)?)?,
        token1: decode_address(slot(3)?)?,
        fee: decode_uint(slot(4)?)?.low_u32(),
        tick_lower: decode_int24_word(slot(5)?)?,
        tick_upper: decode_int24_word(slot(6)?)?,
        liquidity: decode_uint(slot(7)?)?,
        fee_growth_inside0_last_x128: decode_uint(slot(8)?)?,
        fee_growth_inside1_last_x128: decode_uint(slot(9)?)?,
        tokens_owed0: decode_uint(slot(10)?)?,
        tokens_owed1: decode_uint(slot(11)?)?,
    })
}

/// Packed V4 position info word:
/// `bytes25 poolId | int24 tickUpper | int24 tickLower | uint8 hasSubscriber`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionInfo {
    pub pool_id: String,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub has_subscriber: bool,
}

pub fn decode_position_info(raw: &str) -> Result<PositionInfo> {
    let word = word_at(strip_hex_prefix(raw), 0)?;

    Ok(PositionInfo {
        pool_id: format!("0x{}", &word[..50]),
        tick_upper: decode_int24(&word[50..56])?,
        tick_lower: decode_int24(&word[56..62])?,
        has_subscriber: &word[62..] != "00",
    })
}
