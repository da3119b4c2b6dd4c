//! Telemetry utilities for command timing and span construction.

use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(&self.command, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use crate::registry::Scope;
    use tracing::{Span, info_span};

    /// Span covering one reconciliation against a scope.
    pub fn sync(scope: Scope, concurrency: usize) -> Span {
        info_span!("sync", scope = %scope, concurrency)
    }

    /// Span covering one registry call.
    pub fn registry_op(op: &'static str, name: &str) -> Span {
        info_span!("registry", op, command = %name)
    }
}
