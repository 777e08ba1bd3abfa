/*
 * REST API exposing the calculator over JSON
 */

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{get, post, routes, State};
use ethers::types::U256;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::config::Config;
use crate::impact::{ZapRoute, ZapSummary};
use crate::math::{get_position_amounts, get_sqrt_ratio_at_tick, tick_to_price};
use crate::models::{PoolState, TickscopeError};
use crate::service::{PositionService, PositionView};

pub struct ApiState {
    pub config: Config,
    pub service: Arc<PositionService>,
}

type ApiResult<T> = std::result::Result<Json<T>, Custom<String>>;

fn bad_request(error: TickscopeError) -> Custom<String> {
    Custom(Status::BadRequest, error.to_string())
}

fn parse_u256(field: &str, value: &str) -> std::result::Result<U256, Custom<String>> {
    U256::from_dec_str(value.trim()).map_err(|e| {
        bad_request(TickscopeError::ParseError(format!("Invalid {field}: {e:?}")))
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SqrtRatioResponse {
    pub tick: i32,
    pub sqrt_ratio_x96: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PriceResponse {
    pub tick: i32,
    pub price: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PositionAmountsRequest {
    pub tick_current: i32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub sqrt_ratio_x96: String,
    pub liquidity: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PositionAmountsResponse {
    pub amount0: String,
    pub amount1: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DescribePositionRequest {
    pub raw: String,
    pub sqrt_price_x96: String,
    pub tick: i32,
    pub token0_decimals: u8,
    pub token1_decimals: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatUnitsResponse {
    pub formatted: String,
}

#[get("/api/v1/ticks/<tick>/sqrt-ratio")]
pub fn get_sqrt_ratio(tick: i32) -> ApiResult<SqrtRatioResponse> {
    let ratio = get_sqrt_ratio_at_tick(tick).map_err(bad_request)?;
    Ok(Json(SqrtRatioResponse {
        tick,
        sqrt_ratio_x96: ratio.to_string(),
    }))
}

#[get("/api/v1/ticks/<tick>/price?<base_decimals>&<quote_decimals>&<revert>")]
pub fn get_tick_price(
    tick: i32,
    base_decimals: u8,
    quote_decimals: u8,
    revert: Option<bool>,
) -> ApiResult<PriceResponse> {
    let price = tick_to_price(tick, base_decimals, quote_decimals, revert.unwrap_or(false))
        .map_err(bad_request)?;
    Ok(Json(PriceResponse { tick, price }))
}

#[post("/api/v1/positions/amounts", format = "json", data = "<request>")]
pub fn post_position_amounts(
    request: Json<PositionAmountsRequest>,
) -> ApiResult<PositionAmountsResponse> {
    let sqrt_ratio_x96 = parse_u256("sqrt_ratio_x96", &request.sqrt_ratio_x96)?;
    let liquidity = parse_u256("liquidity", &request.liquidity)?;

    let amounts = get_position_amounts(
        request.tick_current,
        request.tick_lower,
        request.tick_upper,
        sqrt_ratio_x96,
        liquidity,
    )
    .map_err(bad_request)?;

    Ok(Json(PositionAmountsResponse {
        amount0: amounts.amount0.to_string(),
        amount1: amounts.amount1.to_string(),
    }))
}

#[post("/api/v1/positions/describe", format = "json", data = "<request>")]
pub fn post_describe_position(
    request: Json<DescribePositionRequest>,
    state: &State<ApiState>,
) -> ApiResult<PositionView> {
    let pool = PoolState {
        sqrt_price_x96: parse_u256("sqrt_price_x96", &request.sqrt_price_x96)?,
        tick: request.tick,
    };

    let view = state
        .service
        .describe_position(
            &request.raw,
            &pool,
            request.token0_decimals,
            request.token1_decimals,
        )
        .map_err(bad_request)?;

    Ok(Json(view))
}

#[get("/api/v1/format/units?<value>&<decimals>&<max_decimals>")]
pub fn get_format_units(
    value: &str,
    decimals: u8,
    max_decimals: Option<usize>,
    state: &State<ApiState>,
) -> Json<FormatUnitsResponse> {
    Json(FormatUnitsResponse {
        formatted: state
            .service
            .formatter()
            .format_units(value, decimals, max_decimals),
    })
}

#[post("/api/v1/zap/summary", format = "json", data = "<route>")]
pub fn post_zap_summary(route: Json<ZapRoute>, state: &State<ApiState>) -> Json<ZapSummary> {
    Json(state.service.summarize_route(&route))
}

#[get("/health")]
pub fn health_check() -> &'static str {
    "OK"
}

#[must_use]
pub fn create_rocket(state: ApiState) -> rocket::Rocket<rocket::Build> {
    let figment = rocket::Config::figment()
        .merge(("address", state.config.server.host.clone()))
        .merge(("port", state.config.server.port));

    rocket::custom(figment).manage(state).mount(
        "/",
        routes![
            get_sqrt_ratio,
            get_tick_price,
            post_position_amounts,
            post_describe_position,
            get_format_units,
            post_zap_summary,
            health_check
        ],
    )
}
