//! Notifier - notification entry point for one configuration scope
//!
//! Bundles the scope's registry, its transport and a dispatcher. Automation
//! callers hand it a `ServiceCall`; the outcome comes back as a value.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use contracts::{
    DispatchOutcome, NotificationRequest, NotifierConfig, PanelName, PanelTransport, ServiceCall,
};
use panel_registry::PanelRegistry;

use crate::dispatcher::Dispatcher;
use crate::error::DispatcherError;
use crate::metrics::MetricsSnapshot;
use crate::transports::{create_transport, Transport};

pub struct Notifier<T> {
    registry: Arc<PanelRegistry>,
    transport: T,
    dispatcher: Dispatcher,
}

impl<T> Notifier<T>
where
    T: PanelTransport + Sync,
{
    pub fn new(registry: Arc<PanelRegistry>, transport: T, dispatcher: Dispatcher) -> Self {
        info!(
            transport = transport.name(),
            panels = ?registry.list().names(),
            "Notifier initialized"
        );
        Self {
            registry,
            transport,
            dispatcher,
        }
    }

    /// Registry handle, for the configuration surface
    pub fn registry(&self) -> &Arc<PanelRegistry> {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.dispatcher.metrics()
    }

    /// Registered targets (name → topic), `None` when no panel exists.
    pub fn targets(&self) -> Option<HashMap<PanelName, String>> {
        self.registry.list().targets()
    }

    /// Handle a service call as sent by automation rules.
    pub async fn send_message(&self, call: ServiceCall) -> DispatchOutcome {
        self.notify(&call.into_request()).await
    }

    /// Dispatch a tagged request and log how it went.
    #[instrument(name = "notifier_notify", skip(self, request), fields(target = ?request.target))]
    pub async fn notify(&self, request: &NotificationRequest) -> DispatchOutcome {
        let outcome = self
            .dispatcher
            .dispatch(request, &self.registry, &self.transport)
            .await;

        if !outcome.all_delivered() {
            warn!(
                delivered = outcome.delivered_count(),
                unknown = outcome.unknown_count(),
                failed = outcome.failure_count(),
                "Notification partially delivered"
            );
        }
        outcome
    }
}

/// Build a notifier from a loaded configuration
#[instrument(name = "notifier_create", skip(config), fields(panels = config.panels.len()))]
pub async fn create_notifier(config: &NotifierConfig) -> Result<Notifier<Transport>, DispatcherError> {
    let registry = Arc::new(PanelRegistry::from_config(&config.panels)?);
    let transport = create_transport(&config.transport).await?;
    let dispatcher = Dispatcher::from_config(&config.dispatch);
    Ok(Notifier::new(registry, transport, dispatcher))
}
