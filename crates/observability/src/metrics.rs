//! Dispatch metrics
//!
//! Thin wrappers over the `metrics` facade. Without an installed recorder
//! every call is a no-op.

use contracts::{DeliveryStatus, DispatchOutcome, TargetOutcome};
use metrics::{counter, gauge, histogram};

/// Label used for every name that resolved to no panel.
pub const UNKNOWN_PANEL_LABEL: &str = "unknown";

/// `panel` label value for an outcome.
///
/// Unknown names come straight from callers, so they share one series.
pub fn panel_label(outcome: &TargetOutcome) -> String {
    match outcome.status {
        DeliveryStatus::UnknownTarget => UNKNOWN_PANEL_LABEL.to_string(),
        _ => outcome.target.to_string(),
    }
}

/// Record one publish attempt (or unknown-target skip).
pub fn record_target_outcome(outcome: &TargetOutcome) {
    counter!(
        "panelcast_publish_total",
        "panel" => panel_label(outcome),
        "status" => outcome.status.as_str()
    )
    .increment(1);
}

/// Record a finished dispatch.
///
/// # Example
///
/// ```ignore
/// let started = Instant::now();
/// let outcome = dispatcher.dispatch(&request, &registry, &transport).await;
/// observability::record_dispatch(&outcome, started.elapsed().as_secs_f64() * 1000.0);
/// ```
pub fn record_dispatch(outcome: &DispatchOutcome, duration_ms: f64) {
    counter!("panelcast_dispatch_total").increment(1);
    histogram!("panelcast_dispatch_duration_ms").record(duration_ms);
    histogram!("panelcast_dispatch_targets").record(outcome.len() as f64);

    for entry in outcome {
        record_target_outcome(entry);
    }

    let failed = outcome.failure_count() + outcome.unknown_count();
    if failed > 0 {
        counter!("panelcast_dispatch_partial_failures_total").increment(1);
    }
}

/// Record the current number of registered panels.
pub fn record_registry_size(panels: usize) {
    gauge!("panelcast_registry_panels").set(panels as f64);
}
