//! Per-dispatcher counters

use std::sync::atomic::{AtomicU64, Ordering};

use contracts::DeliveryStatus;

/// Counters for one dispatcher instance
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Completed dispatch calls
    dispatch_count: AtomicU64,
    /// Publishes accepted by the transport
    delivered_count: AtomicU64,
    /// Targets that did not resolve to a panel
    unknown_count: AtomicU64,
    /// Publishes the transport failed
    failure_count: AtomicU64,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count.load(Ordering::Relaxed)
    }

    pub fn inc_dispatch_count(&self) {
        self.dispatch_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn delivered_count(&self) -> u64 {
        self.delivered_count.load(Ordering::Relaxed)
    }

    pub fn unknown_count(&self) -> u64 {
        self.unknown_count.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Count one target outcome
    pub fn record(&self, status: &DeliveryStatus) {
        let counter = match status {
            DeliveryStatus::Delivered => &self.delivered_count,
            DeliveryStatus::UnknownTarget => &self.unknown_count,
            DeliveryStatus::TransportFailure(_) => &self.failure_count,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            dispatch_count: self.dispatch_count(),
            delivered_count: self.delivered_count(),
            unknown_count: self.unknown_count(),
            failure_count: self.failure_count(),
        }
    }
}

/// Point-in-time copy of [`DispatchMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub dispatch_count: u64,
    pub delivered_count: u64,
    pub unknown_count: u64,
    pub failure_count: u64,
}
