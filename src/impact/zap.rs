/*
 * Zap route payloads and their display summary
 */

use super::{calculate_price_impact, get_zap_impact};
use crate::format::{DisplayOptions, DisplayStyle, Formatter};
use crate::models::{Result, ZapImpact};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PROTOCOL_FEE_ACTION: &str = "ACTION_TYPE_PROTOCOL_FEE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZapRoute {
    pub zap_details: ZapDetails,
    #[serde(default)]
    pub gas: Option<GasEstimate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZapDetails {
    #[serde(default)]
    pub initial_amount_usd: Option<String>,
    #[serde(default)]
    pub final_amount_usd: Option<String>,
    #[serde(default)]
    pub price_impact: Option<f64>,
    #[serde(default)]
    pub suggested_slippage: Option<u32>,
    #[serde(default)]
    pub actions: Vec<ZapAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZapAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub protocol_fee: Option<ProtocolFee>,
}

/// Fee in parts per hundred thousand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProtocolFee {
    pub pcm: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GasEstimate {
    #[serde(default)]
    pub usd: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZapSummary {
    pub impact: ZapImpact,
    pub initial_amount_usd: String,
    pub final_amount_usd: String,
    pub gas_usd: String,
    pub protocol_fee_percent: Option<f64>,
    pub protocol_fee_display: String,
}

pub fn parse_zap_route(body: &str) -> Result<ZapRoute> {
    Ok(serde_json::from_str(body)?)
}

fn parse_usd(value: Option<&String>) -> Option<f64> {
    value.and_then(|v| v.trim().parse::<f64>().ok())
}

/// Builds the display summary of a zap route. The route's own `priceImpact`
/// wins; without it the impact is derived from the USD amounts.
#[must_use]
pub fn summarize_zap(route: &ZapRoute, default_slippage: u32, formatter: &Formatter) -> ZapSummary {
    let details = &route.zap_details;
    let initial_usd = parse_usd(details.initial_amount_usd.as_ref());
    let final_usd = parse_usd(details.final_amount_usd.as_ref());

    let price_impact = details.price_impact.or_else(|| match (initial_usd, final_usd) {
        (Some(initial), Some(final_)) => calculate_price_impact(initial, final_),
        _ => None,
    });
    let suggested_slippage = details.suggested_slippage.unwrap_or(default_slippage);

    let protocol_fee_percent = details
        .actions
        .iter()
        .find(|action| action.kind == PROTOCOL_FEE_ACTION)
        .and_then(|action| action.protocol_fee)
        .map(|fee| f64::from(fee.pcm) / 1_000.0);

    let usd = DisplayOptions {
        style: DisplayStyle::Currency,
        fraction_digits: Some(2),
        ..DisplayOptions::default()
    };
    let percent = DisplayOptions {
        style: DisplayStyle::Percent,
        significant_digits: Some(4),
        ..DisplayOptions::default()
    };

    let gas_usd = parse_usd(route.gas.as_ref().and_then(|gas| gas.usd.as_ref()));

    debug!(
        ?price_impact,
        suggested_slippage,
        ?protocol_fee_percent,
        "summarizing zap route"
    );

    ZapSummary {
        impact: get_zap_impact(price_impact, suggested_slippage),
        initial_amount_usd: formatter.format_display_number(initial_usd, &usd),
        final_amount_usd: formatter.format_display_number(final_usd, &usd),
        gas_usd: formatter.format_display_number(gas_usd, &usd),
        protocol_fee_percent,
        protocol_fee_display: formatter.format_display_number(protocol_fee_percent, &percent),
    }
}
