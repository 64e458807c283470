//! # Dispatcher
//!
//! Notification dispatch engine.
//!
//! Responsibilities:
//! - Resolve a request's target selector against a registry snapshot
//! - Build one payload per request
//! - Publish to every resolved topic, isolating per-target failures
//! - Provide the concrete transports and the `Notifier` entry point

pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod notifier;
pub mod transports;

pub use contracts::{DispatchOutcome, NotificationRequest, PanelTransport, ServiceCall};
pub use dispatcher::{dispatch, Dispatcher};
pub use error::DispatcherError;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use notifier::{create_notifier, Notifier};
pub use transports::{
    create_transport, FileTransport, LogTransport, NetworkTransport, Transport,
};
