/*
 * Position service that ties decoding, amount math and formatting together
 */

use crate::{
    abi::{decode_position, RawPosition},
    config::{Config, ZapConfig},
    diagnostics::TracingSink,
    format::Formatter,
    impact::{parse_zap_route, summarize_zap, ZapRoute, ZapSummary},
    math::{get_position_amounts, sqrt_price_to_price, tick_to_price},
    models::{PoolState, PositionAmounts, Result},
};
use ethers::types::U256;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Significant digits shown for position token balances.
const AMOUNT_SIGNIFICANT_DIGITS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    InRange,
    /// Pool price below the range; the position is all token0.
    BelowRange,
    /// Pool price at or above the range; the position is all token1.
    AboveRange,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionView {
    pub token0: String,
    pub token1: String,
    pub fee: u32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: String,
    pub amount0: String,
    pub amount1: String,
    pub amount0_display: String,
    pub amount1_display: String,
    pub price_lower: String,
    pub price_upper: String,
    pub price_current: String,
    pub status: PositionStatus,
}

pub struct PositionService {
    formatter: Formatter,
    zap: ZapConfig,
}

impl PositionService {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        info!("Initializing Position Service");
        Self::with_formatter(
            Formatter::new(config.formatting.clone(), Arc::new(TracingSink)),
            config.zap.clone(),
        )
    }

    #[must_use]
    pub fn with_formatter(formatter: Formatter, zap: ZapConfig) -> Self {
        Self { formatter, zap }
    }

    #[must_use]
    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn position_amounts(&self, position: &RawPosition, pool: &PoolState) -> Result<PositionAmounts> {
        get_position_amounts(
            pool.tick,
            position.tick_lower,
            position.tick_upper,
            pool.sqrt_price_x96,
            position.liquidity,
        )
    }

    /// Decodes a raw `positions(uint256)` return blob and prices it against the pool.
    pub fn describe_position(
        &self,
        raw_hex: &str,
        pool: &PoolState,
        token0_decimals: u8,
        token1_decimals: u8,
    ) -> Result<PositionView> {
        let position = decode_position(raw_hex)?;
        debug!(
            token0 = %position.token0,
            token1 = %position.token1,
            tick_lower = position.tick_lower,
            tick_upper = position.tick_upper,
            "decoded position"
        );

        let amounts = self.position_amounts(&position, pool)?;

        let status = if position.liquidity.is_zero() {
            PositionStatus::Closed
        } else if pool.tick < position.tick_lower {
            PositionStatus::BelowRange
        } else if pool.tick < position.tick_upper {
            PositionStatus::InRange
        } else {
            PositionStatus::AboveRange
        };

        Ok(PositionView {
            price_lower: tick_to_price(position.tick_lower, token0_decimals, token1_decimals, false)?,
            price_upper: tick_to_price(position.tick_upper, token0_decimals, token1_decimals, false)?,
            price_current: sqrt_price_to_price(
                pool.sqrt_price_x96,
                token0_decimals,
                token1_decimals,
                false,
            )?,
            amount0_display: self.display_amount(amounts.amount0, token0_decimals),
            amount1_display: self.display_amount(amounts.amount1, token1_decimals),
            amount0: amounts.amount0.to_string(),
            amount1: amounts.amount1.to_string(),
            liquidity: position.liquidity.to_string(),
            token0: position.token0,
            token1: position.token1,
            fee: position.fee,
            tick_lower: position.tick_lower,
            tick_upper: position.tick_upper,
            status,
        })
    }

    fn display_amount(&self, amount: U256, decimals: u8) -> String {
        self.formatter
            .format_token_amount(&amount.to_string(), decimals, AMOUNT_SIGNIFICANT_DIGITS)
    }

    pub fn summarize_route(&self, route: &ZapRoute) -> ZapSummary {
        summarize_zap(route, self.zap.suggested_slippage_bps, &self.formatter)
    }

    pub fn summarize_zap_json(&self, body: &str) -> Result<ZapSummary> {
        let route = parse_zap_route(body)?;
        Ok(self.summarize_route(&route))
    }
}
