/*
 * Display formatting for token amounts and prices.
 *
 * Everything reachable from `Formatter` is soft-fail: bad input is reported
 * through the diagnostics port and a fallback string is returned.
 */

mod display;
mod units;

use crate::config::FormatConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use num_bigint::BigUint;
use std::sync::Arc;

pub use display::{to_subscript, DisplayOptions, DisplayStyle};
pub use units::{parse_units, to_raw_string};

#[derive(Clone)]
pub struct Formatter {
    config: FormatConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(FormatConfig::default(), Arc::new(TracingSink))
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Formatter {
    #[must_use]
    pub fn new(config: FormatConfig, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { config, sink }
    }

    #[must_use]
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Renders a raw integer string in token units, optionally truncated to
    /// `max_display_decimals` fractional digits. Returns `"0"` for input that
    /// is not a plain non-negative integer.
    pub fn format_units(
        &self,
        value: &str,
        decimals: u8,
        max_display_decimals: Option<usize>,
    ) -> String {
        if !units::is_raw_amount(value) {
            self.sink
                .report("format_units", &format!("invalid raw amount {value:?}"));
            return "0".to_string();
        }

        let Some(raw) = BigUint::parse_bytes(value.as_bytes(), 10) else {
            self.sink
                .report("format_units", &format!("unparseable raw amount {value:?}"));
            return "0".to_string();
        };

        let (whole, fraction) = units::split_units(&raw, decimals);
        units::join_units(whole, &fraction, max_display_decimals)
    }

    /// Human display of a number. `None` and NaN render the fallback,
    /// decorated for the requested style.
    pub fn format_display_number(&self, value: Option<f64>, options: &DisplayOptions) -> String {
        let fallback = options
            .fallback
            .as_deref()
            .unwrap_or(self.config.fallback.as_str());

        let Some(value) = value.filter(|v| !v.is_nan()) else {
            return display::decorate(fallback, options.style, false);
        };

        if value.is_infinite() {
            self.sink
                .report("format_display_number", &format!("non-finite value {value}"));
            return display::decorate(fallback, options.style, false);
        }

        let significant_digits = options
            .significant_digits
            .unwrap_or(self.config.significant_digits);

        let (body, negative) = if value > 0.0 && value < 1.0 {
            let digit_limit = options.fraction_digits.unwrap_or(significant_digits);
            (
                display::format_small(value, digit_limit, self.config.subscript_min_zeros),
                false,
            )
        } else {
            (
                display::format_general(
                    value.abs(),
                    significant_digits,
                    options.fraction_digits,
                    self.config.compact_threshold,
                ),
                value < 0.0,
            )
        };

        match body {
            // "-0" after rounding a tiny negative value
            Some(body) => display::decorate(&body, options.style, negative && body != "0"),
            None => {
                self.sink
                    .report("format_display_number", &format!("cannot represent {value}"));
                display::decorate(fallback, options.style, false)
            }
        }
    }

    /// `format_units` followed by `format_display_number`, for showing a raw
    /// token balance at a chosen precision.
    pub fn format_token_amount(&self, raw: &str, decimals: u8, significant_digits: u32) -> String {
        let units = self.format_units(raw, decimals, None);
        match units.parse::<f64>() {
            Ok(value) => self.format_display_number(
                Some(value),
                &DisplayOptions::significant(significant_digits),
            ),
            Err(e) => {
                self.sink
                    .report("format_token_amount", &format!("{units}: {e}"));
                "0".to_string()
            }
        }
    }
}

pub fn format_units(value: &str, decimals: u8, max_display_decimals: Option<usize>) -> String {
    Formatter::default().format_units(value, decimals, max_display_decimals)
}

pub fn format_display_number(value: Option<f64>, options: &DisplayOptions) -> String {
    Formatter::default().format_display_number(value, options)
}

pub fn format_token_amount(raw: &str, decimals: u8, significant_digits: u32) -> String {
    Formatter::default().format_token_amount(raw, decimals, significant_digits)
}
