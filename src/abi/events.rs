/*
 * Liquidity event log decoding
 *
 * IncreaseLiquidity / DecreaseLiquidity data: liquidity | amount0 | amount1
 * ModifyLiquidity data: tickLower | tickUpper | liquidityDelta | salt
 */

use super::{decode_int24_word, decode_uint, strip_hex_prefix, word_at};
use crate::models::{Result, TickscopeError};
use ethers::types::{I256, U256};
use ethers::utils::{hex, keccak256};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const INCREASE_LIQUIDITY_SIGNATURE: &str = "IncreaseLiquidity(uint256,uint128,uint256,uint256)";
pub const DECREASE_LIQUIDITY_SIGNATURE: &str = "DecreaseLiquidity(uint256,uint128,uint256,uint256)";
pub const MODIFY_LIQUIDITY_SIGNATURE: &str =
    "ModifyLiquidity(bytes32,address,int24,int24,int256,bytes32)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityEvent {
    pub liquidity: U256,
    pub amount0: U256,
    pub amount1: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyLiquidity {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity_delta: I256,
    pub salt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedPosition {
    pub token_id: U256,
    pub event: LiquidityEvent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: String,
}

/// The part of an `eth_getTransactionReceipt` result that carries logs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionReceipt {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// `0x`-prefixed keccak256 of an event signature (topic 0).
#[must_use]
pub fn event_topic(signature: &str) -> String {
    format!("0x{}", hex::encode(keccak256(signature.as_bytes())))
}

fn decode_liquidity_event(data: &str) -> Result<LiquidityEvent> {
    let data = strip_hex_prefix(data);
    Ok(LiquidityEvent {
        liquidity: decode_uint(word_at(data, 0)?)?,
        amount0: decode_uint(word_at(data, 1)?)?,
        amount1: decode_uint(word_at(data, 2)?)?,
    })
}

pub fn decode_increase_liquidity(data: &str) -> Result<LiquidityEvent> {
    decode_liquidity_event(data)
}

pub fn decode_decrease_liquidity(data: &str) -> Result<LiquidityEvent> {
    decode_liquidity_event(data)
}

pub fn decode_modify_liquidity(data: &str) -> Result<ModifyLiquidity> {
    let data = strip_hex_prefix(data);
    Ok(ModifyLiquidity {
        tick_lower: decode_int24_word(word_at(data, 0)?)?,
        tick_upper: decode_int24_word(word_at(data, 1)?)?,
        liquidity_delta: I256::from_raw(decode_uint(word_at(data, 2)?)?),
        salt: format!("0x{}", word_at(data, 3)?),
    })
}

/// Finds the first `IncreaseLiquidity` log in a receipt; the token id is the
/// indexed `topics[1]`.
pub fn find_increase_liquidity(receipt: &TransactionReceipt) -> Result<Option<MintedPosition>> {
    let topic = event_topic(INCREASE_LIQUIDITY_SIGNATURE);

    let Some(log) = receipt.logs.iter().find(|log| {
        log.topics
            .first()
            .is_some_and(|t| t.eq_ignore_ascii_case(&topic))
    }) else {
        debug!(logs = receipt.logs.len(), "no IncreaseLiquidity log in receipt");
        return Ok(None);
    };

    let token_id = match log.topics.get(1) {
        Some(topic) => decode_uint(topic)?,
        None => {
            return Err(TickscopeError::DecodeError(
                "IncreaseLiquidity log without tokenId topic".to_string(),
            ))
        }
    };

    Ok(Some(MintedPosition {
        token_id,
        event: decode_increase_liquidity(&log.data)?,
    }))
}
