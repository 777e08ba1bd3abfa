/*
 * Price impact classification for swaps and zaps
 */

mod zap;

use crate::models::{PriceImpactLevel, ZapImpact};

pub use zap::{
    parse_zap_route, summarize_zap, GasEstimate, ProtocolFee, ZapAction, ZapDetails, ZapRoute,
    ZapSummary, PROTOCOL_FEE_ACTION,
};

pub const INVALID_IMPACT_MESSAGE: &str = "Unable to calculate Price Impact";
pub const HIGH_IMPACT_MESSAGE: &str = "Price impact is high";
pub const VERY_HIGH_IMPACT_MESSAGE: &str =
    "Price impact is very high. You will lose funds! Please turn on Degen Mode to proceed";

/// Classifies a price impact percentage against the route's suggested
/// slippage (in basis points). Above twice the threshold is `VeryHigh`,
/// above the threshold is `High`.
#[must_use]
pub fn get_zap_impact(price_impact: Option<f64>, suggested_slippage: u32) -> ZapImpact {
    let Some(pi) = price_impact.filter(|pi| !pi.is_nan()) else {
        return ZapImpact {
            msg: INVALID_IMPACT_MESSAGE.to_string(),
            level: PriceImpactLevel::Invalid,
            display: "--".to_string(),
        };
    };

    let threshold = 2.0 * f64::from(suggested_slippage) * 100.0 / 10_000.0;

    let (level, msg) = if pi > 2.0 * threshold {
        (PriceImpactLevel::VeryHigh, VERY_HIGH_IMPACT_MESSAGE)
    } else if pi > threshold {
        (PriceImpactLevel::High, HIGH_IMPACT_MESSAGE)
    } else {
        (PriceImpactLevel::Normal, "")
    };

    ZapImpact {
        msg: msg.to_string(),
        level,
        display: display_impact(pi),
    }
}

fn display_impact(pi: f64) -> String {
    if pi < 0.01 {
        "<0.01%".to_string()
    } else {
        format!("{pi:.2}%")
    }
}

/// Percentage of value lost between what goes in and what comes out.
#[must_use]
pub fn calculate_price_impact(amount_in_usd: f64, amount_out_usd: f64) -> Option<f64> {
    if amount_in_usd == 0.0 || !amount_in_usd.is_finite() || !amount_out_usd.is_finite() {
        return None;
    }
    Some((amount_in_usd - amount_out_usd) / amount_in_usd * 100.0)
}
