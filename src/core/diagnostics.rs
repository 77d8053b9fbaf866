//! Reporting of non-fatal events.
//!
//! The reducer never fails. When it meets an action it does not understand it
//! reports the discriminator to a [`DiagnosticSink`] and carries on. Hosts
//! choose the sink; the default forwards to `tracing`.

use std::sync::Mutex;

/// Receiver for reducer diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// An action with discriminator `kind` was ignored.
    fn unrecognized_action(&self, kind: &str);
}

/// Emits a `tracing` warning per report.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn unrecognized_action(&self, kind: &str) {
        tracing::warn!(kind, "Do not recognize action {}", kind);
    }
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn unrecognized_action(&self, _kind: &str) {}
}

/// Keeps every report in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discriminators reported so far.
    pub fn reports(&self) -> Vec<String> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingSink {
    fn unrecognized_action(&self, kind: &str) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(kind.to_string());
        }
    }
}
