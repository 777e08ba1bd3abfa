/*
 * Diagnostic reporting port used by the soft-fail formatting path
 */

use std::sync::Mutex;
use tracing::warn;

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, operation: &'static str, detail: &str);
}

/// Forwards diagnostics to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, operation: &'static str, detail: &str) {
        warn!(operation, "{}", detail);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _operation: &'static str, _detail: &str) {}
}

/// Keeps every report in memory. Handy for hosts that surface diagnostics
/// somewhere other than the log.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, operation: &'static str, detail: &str) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push((operation.to_string(), detail.to_string()));
    }
}
