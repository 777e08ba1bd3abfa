/*
 * Minimal ABI helpers: selectors, call encoding and fixed-slot decoding
 * of eth_call return data and event logs
 */

pub mod events;
pub mod position;

use crate::models::{Result, TickscopeError};
use ethers::types::U256;
use ethers::utils::{hex, keccak256};

pub use events::{
    decode_decrease_liquidity, decode_increase_liquidity, decode_modify_liquidity, event_topic,
    find_increase_liquidity, LiquidityEvent, LogEntry, MintedPosition, ModifyLiquidity,
    TransactionReceipt,
};
pub use position::{
    decode_position, decode_position_info, positions_call, PositionInfo, RawPosition,
    POSITION_HEX_LEN,
};

/// Hex characters in one 32-byte ABI slot.
pub const WORD_HEX_LEN: usize = 64;

const INT24_HEX_LEN: usize = 6;

#[must_use]
pub fn strip_hex_prefix(data: &str) -> &str {
    data.strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data)
}

/// First four bytes of keccak256(signature), hex encoded without a prefix.
#[must_use]
pub fn function_selector(signature: &str) -> String {
    hex::encode(&keccak256(signature.as_bytes())[..4])
}

#[must_use]
pub fn encode_word(value: U256) -> String {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    hex::encode(bytes)
}

/// `0x` + selector + one 32-byte word per static argument.
#[must_use]
pub fn encode_call(signature: &str, args: &[U256]) -> String {
    let mut data = format!("0x{}", function_selector(signature));
    for arg in args {
        data.push_str(&encode_word(*arg));
    }
    data
}

/// Returns the `index`-th 32-byte slot of `data` (prefix already stripped).
pub fn word_at(data: &str, index: usize) -> Result<&str> {
    let start = index * WORD_HEX_LEN;
    let word = data.get(start..start + WORD_HEX_LEN).ok_or_else(|| {
        TickscopeError::DecodeError(format!(
            "slot {index} out of range for {} hex chars",
            data.len()
        ))
    })?;
    ensure_hex(word)?;
    Ok(word)
}

fn ensure_hex(data: &str) -> Result<()> {
    if data.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(TickscopeError::DecodeError(format!("not hex: {data:?}")))
    }
}

/// `0x` followed by the trailing 40 hex characters (20 bytes) of `data`.
pub fn decode_address(data: &str) -> Result<String> {
    let data = strip_hex_prefix(data);
    ensure_hex(data)?;
    if data.len() < 40 {
        return Err(TickscopeError::DecodeError(format!(
            "address needs 40 hex chars, got {}",
            data.len()
        )));
    }
    Ok(format!("0x{}", &data[data.len() - 40..]))
}

pub fn decode_uint(data: &str) -> Result<U256> {
    let data = strip_hex_prefix(data);
    if data.is_empty() || data.len() > WORD_HEX_LEN {
        return Err(TickscopeError::DecodeError(format!(
            "uint256 needs 1..=64 hex chars, got {}",
            data.len()
        )));
    }
    ensure_hex(data)?;
    U256::from_str_radix(data, 16)
        .map_err(|e| TickscopeError::DecodeError(format!("invalid uint {data:?}: {e:?}")))
}

/// Two's-complement int24 from up to six hex characters.
pub fn decode_int24(data: &str) -> Result<i32> {
    let data = strip_hex_prefix(data);
    if data.is_empty() || data.len() > INT24_HEX_LEN {
        return Err(TickscopeError::DecodeError(format!(
            "int24 needs 1..=6 hex chars, got {}",
            data.len()
        )));
    }
    ensure_hex(data)?;
    let value = i32::from_str_radix(data, 16)
        .map_err(|e| TickscopeError::DecodeError(format!("invalid int24 {data:?}: {e}")))?;

    if value >= 0x80_0000 {
        Ok(value - 0x100_0000)
    } else {
        Ok(value)
    }
}

/// int24 stored sign-extended in a full slot; only the low 24 bits matter.
pub(crate) fn decode_int24_word(word: &str) -> Result<i32> {
    decode_int24(&word[word.len().saturating_sub(INT24_HEX_LEN)..])
}
