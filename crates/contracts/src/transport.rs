//! PanelTransport trait - Dispatcher output interface
//!
//! The dispatcher only knows `publish(topic, payload)`; connection handling,
//! QoS and framing belong to the implementation.

use bytes::Bytes;

use crate::ContractError;

/// Publish capability consumed by the dispatcher.
///
/// `publish` takes `&self` so one transport can serve several concurrent
/// publishes of the same dispatch.
#[trait_variant::make(PanelTransport: Send)]
pub trait LocalPanelTransport {
    /// Transport name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Publish one payload to one topic.
    ///
    /// A single attempt: success means the transport accepted the message,
    /// not that a panel displayed it.
    ///
    /// # Errors
    /// Returns a publish or connection error carrying the transport's detail
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), ContractError>;
}
