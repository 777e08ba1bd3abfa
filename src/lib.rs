/*
 * Tickscope - concentrated-liquidity math and display library
 * Core library exports and module declarations
 */

pub mod abi;
pub mod api;
pub mod config;
pub mod diagnostics;
pub mod format;
pub mod impact;
pub mod math;
pub mod models;
pub mod rpc;
pub mod service;

pub use config::Config;
pub use models::*;
pub use service::PositionService;
