/*
 * Configuration management for the tickscope calculator
 */

use crate::models::{Result, TickscopeError};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub formatting: FormatConfig,
    pub zap: ZapConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

/// Defaults applied by the display formatter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FormatConfig {
    pub fallback: String,
    pub significant_digits: u32,
    pub compact_threshold: f64,
    /// Leading fractional zeros at which the subscript form kicks in.
    pub subscript_min_zeros: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZapConfig {
    pub suggested_slippage_bps: u32,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            fallback: "--".to_string(),
            significant_digits: 8,
            compact_threshold: 10_000_000.0,
            subscript_min_zeros: 4,
        }
    }
}

impl Default for ZapConfig {
    fn default() -> Self {
        Self {
            suggested_slippage_bps: 50,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let format_defaults = FormatConfig::default();
        let zap_defaults = ZapConfig::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("SERVER_PORT", 8080)?,
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            formatting: FormatConfig {
                fallback: env::var("DISPLAY_FALLBACK").unwrap_or(format_defaults.fallback),
                significant_digits: parse_var(
                    "DISPLAY_SIGNIFICANT_DIGITS",
                    format_defaults.significant_digits,
                )?,
                compact_threshold: parse_var(
                    "DISPLAY_COMPACT_THRESHOLD",
                    format_defaults.compact_threshold,
                )?,
                subscript_min_zeros: parse_var(
                    "DISPLAY_SUBSCRIPT_MIN_ZEROS",
                    format_defaults.subscript_min_zeros,
                )?,
            },
            zap: ZapConfig {
                suggested_slippage_bps: parse_var(
                    "ZAP_SUGGESTED_SLIPPAGE_BPS",
                    zap_defaults.suggested_slippage_bps,
                )?,
            },
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| TickscopeError::ConfigError(format!("Invalid {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_when_unset() {
        let value: u32 = parse_var("TICKSCOPE_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        env::set_var("TICKSCOPE_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_var("TICKSCOPE_TEST_BAD_PORT", 8080);
        assert!(matches!(result, Err(TickscopeError::ConfigError(_))));
    }

    #[test]
    fn default_format_config_matches_display_policy() {
        let config = FormatConfig::default();
        assert_eq!(config.fallback, "--");
        assert_eq!(config.significant_digits, 8);
        assert_eq!(config.subscript_min_zeros, 4);
    }
}
