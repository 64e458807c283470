//! Dispatcher - resolves targets and fans one payload out to panel topics

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use futures::future::join_all;
use tracing::{debug, error, info, instrument, warn};

use contracts::{
    ContractError, DeliveryStatus, DispatchConfig, DispatchOutcome, FanOut, NotificationRequest,
    PanelName, PanelTransport, Payload, TargetOutcome, TargetSelector,
};
use panel_registry::{PanelRegistry, PanelSnapshot};

use crate::metrics::{DispatchMetrics, MetricsSnapshot};

/// Dispatch engine.
///
/// Holds only tuning and counters; registry and transport are passed to each
/// call so one dispatcher can serve any configuration scope.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    fan_out: FanOut,
    publish_timeout: Option<Duration>,
    metrics: Arc<DispatchMetrics>,
}

impl Dispatcher {
    /// Sequential dispatcher without publish timeout
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self {
            fan_out: config.fan_out,
            publish_timeout: config.publish_timeout_ms.map(Duration::from_millis),
            metrics: Arc::default(),
        }
    }

    pub fn with_fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }

    pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = Some(timeout);
        self
    }

    pub fn fan_out(&self) -> FanOut {
        self.fan_out
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Dispatch one notification.
    ///
    /// Every resolved target gets exactly one publish attempt, or an
    /// `UnknownTarget` entry when it names no panel. A failing target never
    /// stops the remaining ones. Never returns an error.
    #[instrument(
        name = "dispatcher_dispatch",
        skip(self, request, registry, transport),
        fields(transport = transport.name(), fan_out = ?self.fan_out)
    )]
    pub async fn dispatch<T>(
        &self,
        request: &NotificationRequest,
        registry: &PanelRegistry,
        transport: &T,
    ) -> DispatchOutcome
    where
        T: PanelTransport + Sync,
    {
        let started = Instant::now();
        let snapshot = registry.list();
        let plan = plan_targets(&request.target, &snapshot);

        let outcome = if plan.is_empty() {
            debug!("No targets resolved, nothing to publish");
            DispatchOutcome::new()
        } else {
            match Payload::from_request(request).encode() {
                Ok(payload) => self.fan_out_to(plan, payload, transport).await,
                Err(e) => fail_all(plan, &e),
            }
        };

        if outcome.unknown_count() > 0 {
            warn!(
                unknown = outcome.unknown_count(),
                available = ?snapshot.names(),
                "Notification named unknown panels"
            );
        }

        self.metrics.inc_dispatch_count();
        observability::record_registry_size(snapshot.len());
        observability::record_dispatch(&outcome, started.elapsed().as_secs_f64() * 1000.0);

        info!(
            targets = outcome.len(),
            delivered = outcome.delivered_count(),
            unknown = outcome.unknown_count(),
            failed = outcome.failure_count(),
            "Dispatch complete"
        );
        outcome
    }

    async fn fan_out_to<T>(
        &self,
        plan: Vec<(PanelName, Option<String>)>,
        payload: Bytes,
        transport: &T,
    ) -> DispatchOutcome
    where
        T: PanelTransport + Sync,
    {
        match self.fan_out {
            FanOut::Sequential => {
                let mut outcome = DispatchOutcome::with_capacity(plan.len());
                for (target, topic) in plan {
                    outcome.push(self.send_one(transport, target, topic, payload.clone()).await);
                }
                outcome
            }
            FanOut::Concurrent => {
                // join_all keeps input order, so outcomes still follow resolution order
                let sends = plan.into_iter().map(|(target, topic)| {
                    self.send_one(transport, target, topic, payload.clone())
                });
                join_all(sends).await.into_iter().collect()
            }
        }
    }

    async fn send_one<T>(
        &self,
        transport: &T,
        target: PanelName,
        topic: Option<String>,
        payload: Bytes,
    ) -> TargetOutcome
    where
        T: PanelTransport + Sync,
    {
        let status = match topic.as_deref() {
            None => {
                warn!(panel = %target, "Unknown panel");
                DeliveryStatus::UnknownTarget
            }
            Some(topic) => match self.publish(transport, topic, payload).await {
                Ok(()) => {
                    debug!(panel = %target, topic, "Published");
                    DeliveryStatus::Delivered
                }
                Err(e) => {
                    error!(panel = %target, topic, error = %e, "Publish failed");
                    DeliveryStatus::TransportFailure(e.to_string())
                }
            },
        };

        self.metrics.record(&status);
        TargetOutcome {
            target,
            topic,
            status,
        }
    }

    async fn publish<T>(&self, transport: &T, topic: &str, payload: Bytes) -> Result<(), ContractError>
    where
        T: PanelTransport + Sync,
    {
        let Some(limit) = self.publish_timeout else {
            return transport.publish(topic, payload).await;
        };

        match tokio::time::timeout(limit, transport.publish(topic, payload)).await {
            Ok(result) => result,
            Err(_) => Err(ContractError::publish(
                transport.name(),
                topic,
                format!("publish timed out after {}ms", limit.as_millis()),
            )),
        }
    }
}

/// Dispatch with a default (sequential, no timeout) dispatcher.
pub async fn dispatch<T>(
    request: &NotificationRequest,
    registry: &PanelRegistry,
    transport: &T,
) -> DispatchOutcome
where
    T: PanelTransport + Sync,
{
    Dispatcher::new().dispatch(request, registry, transport).await
}

/// Resolve the selector into `(name, topic)` pairs against one snapshot.
fn plan_targets(
    selector: &TargetSelector,
    snapshot: &PanelSnapshot,
) -> Vec<(PanelName, Option<String>)> {
    let names = match selector {
        TargetSelector::All => snapshot.names(),
        TargetSelector::Single(name) => vec![name.clone()],
        TargetSelector::Many(names) => names.clone(),
    };

    names
        .into_iter()
        .map(|name| {
            let topic = snapshot.resolve(&name).map(str::to_owned);
            (name, topic)
        })
        .collect()
}

fn fail_all(plan: Vec<(PanelName, Option<String>)>, cause: &ContractError) -> DispatchOutcome {
    error!(error = %cause, "Payload encoding failed");
    plan.into_iter()
        .map(|(target, topic)| {
            let status = if topic.is_some() {
                DeliveryStatus::TransportFailure(cause.to_string())
            } else {
                DeliveryStatus::UnknownTarget
            };
            TargetOutcome {
                target,
                topic,
                status,
            }
        })
        .collect()
}
