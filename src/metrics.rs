//! Prometheus metrics collection for slashsync.
//!
//! Metrics are process-global and no-ops until [`init`] has run, so library
//! users that never call it pay nothing.
//!
//! - `slash_command_total{command}` - Dispatched commands by name
//! - `slash_command_duration_seconds{command}` - Handler latency histogram
//! - `slash_command_errors_total{command,kind}` - Dispatch failures by kind
//! - `slash_sync_operations_total{op,outcome}` - Registry calls made by sync

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

/// `command` label used for names that match no registered command.
pub const UNKNOWN_COMMAND: &str = "<unknown>";

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Commands dispatched, by command name.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Handler latency by command name.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Dispatch errors by command name and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Registry operations issued by the synchronizer.
pub static SYNC_OPERATIONS: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; later calls only log registration conflicts.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("slash_command_total", "Slash commands dispatched by name"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("slash_command_duration_seconds", "Slash command handler latency")
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("slash_command_errors_total", "Slash command dispatch errors"), &["command", "kind"]));
    register!(SYNC_OPERATIONS, IntCounterVec::new(Opts::new("slash_sync_operations_total", "Registry operations issued during sync"), &["op", "outcome"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, kind: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, kind]).inc();
    }
}

/// Record one registry operation and how it ended.
#[inline]
pub fn record_sync_operation(op: &str, outcome: &str) {
    if let Some(c) = SYNC_OPERATIONS.get() {
        c.with_label_values(&[op, outcome]).inc();
    }
}
