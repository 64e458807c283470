//! LogTransport - logs every publish via tracing

use bytes::Bytes;
use contracts::{ContractError, PanelTransport};
use tracing::{info, instrument};

/// Transport that only logs what would be published. Always succeeds.
pub struct LogTransport {
    name: String,
}

impl LogTransport {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PanelTransport for LogTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_transport_publish",
        skip(self, payload),
        fields(transport = %self.name, bytes = payload.len())
    )]
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), ContractError> {
        info!(
            transport = %self.name,
            topic,
            payload = %String::from_utf8_lossy(&payload),
            "Notification published"
        );
        Ok(())
    }
}
