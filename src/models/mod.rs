/*
 * Data models and error types shared across the numeric core
 */

use ethers::types::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token composition of a position at the current pool price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionAmounts {
    pub amount0: U256,
    pub amount1: U256,
}

/// Snapshot of the pool fields the position calculator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceImpactLevel {
    Normal,
    High,
    VeryHigh,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZapImpact {
    pub msg: String,
    pub level: PriceImpactLevel,
    pub display: String,
}

#[derive(Debug, Error)]
pub enum TickscopeError {
    #[error("TICK must be within bounds: {0}")]
    TickOutOfBounds(i32),

    #[error("Sqrt ratio out of bounds: {0}")]
    SqrtRatioOutOfBounds(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TickscopeError>;
