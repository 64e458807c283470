//! Transport implementations
//!
//! Contains LogTransport, FileTransport and NetworkTransport, plus the
//! `Transport` enum built from configuration.

mod file;
mod log;
mod network;

pub use self::file::{FileTransport, FileTransportConfig};
pub use self::log::LogTransport;
pub use self::network::{Envelope, NetworkTransport, NetworkTransportConfig};

use bytes::Bytes;
use contracts::{ContractError, PanelTransport, TransportConfig, TransportKind};
use tracing::instrument;

use crate::error::DispatcherError;

/// Any configured transport
pub enum Transport {
    Log(LogTransport),
    File(FileTransport),
    Network(NetworkTransport),
}

impl PanelTransport for Transport {
    fn name(&self) -> &str {
        match self {
            Self::Log(t) => t.name(),
            Self::File(t) => t.name(),
            Self::Network(t) => t.name(),
        }
    }

    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), ContractError> {
        match self {
            Self::Log(t) => t.publish(topic, payload).await,
            Self::File(t) => t.publish(topic, payload).await,
            Self::Network(t) => t.publish(topic, payload).await,
        }
    }
}

/// Create a transport from configuration
#[instrument(
    name = "dispatcher_create_transport",
    skip(config),
    fields(transport = %config.name, kind = ?config.kind)
)]
pub async fn create_transport(config: &TransportConfig) -> Result<Transport, DispatcherError> {
    match config.kind {
        TransportKind::Log => Ok(Transport::Log(LogTransport::new(&config.name))),
        TransportKind::File => FileTransport::from_params(&config.name, &config.params)
            .map(Transport::File)
            .map_err(|e| DispatcherError::transport_creation(&config.name, e.to_string())),
        TransportKind::Network => NetworkTransport::from_params(&config.name, &config.params)
            .await
            .map(Transport::Network)
            .map_err(|e| DispatcherError::transport_creation(&config.name, e.to_string())),
    }
}
