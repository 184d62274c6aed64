//! Request-path settings read on every request, stored process-wide.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::ServerConfig;

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(1_000);
static OTEL_PARENT_PROPAGATION_ENABLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RuntimeSettings {
    slow_request_threshold_ms: u64,

    /// Only honoured while traces are exported.
    parent_propagation: bool,
}

impl RuntimeSettings {
    fn from_config(config: &ServerConfig) -> Self {
        let observability = &config.observability;

        Self {
            slow_request_threshold_ms: observability.slow_request_threshold_ms,
            parent_propagation: observability.otel_enabled
                && observability.otel_parent_propagation_enabled,
        }
    }
}

pub(super) fn apply_runtime_config(config: &ServerConfig) {
    let settings = RuntimeSettings::from_config(config);

    SLOW_REQUEST_THRESHOLD_MS.store(settings.slow_request_threshold_ms, Ordering::Relaxed);
    OTEL_PARENT_PROPAGATION_ENABLED.store(settings.parent_propagation, Ordering::Relaxed);
}

pub(super) fn slow_request_threshold_ms() -> u64 {
    SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed)
}

pub(super) fn otel_parent_propagation_enabled() -> bool {
    OTEL_PARENT_PROPAGATION_ENABLED.load(Ordering::Relaxed)
}
