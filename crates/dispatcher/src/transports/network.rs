//! NetworkTransport - UDP fire-and-forget towards a broker bridge
//!
//! Each publish is one datagram holding a JSON envelope:
//! `{"topic": ..., "payload": ..., "qos": 1, "retain": false}`.
//! The bridge on the other side republishes it on the message broker.

use bytes::Bytes;
use contracts::{ContractError, PanelTransport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, instrument};

/// Datagram body understood by the broker bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub topic: String,
    /// Serialized panel payload
    pub payload: String,
    pub qos: u8,
    pub retain: bool,
}

/// Configuration for NetworkTransport
#[derive(Debug, Clone)]
pub struct NetworkTransportConfig {
    /// Bridge address
    pub addr: SocketAddr,
    /// Delivery QoS requested from the broker (0..=2)
    pub qos: u8,
    /// Whether the broker should retain the message
    pub retain: bool,
    /// Max datagram size (UDP typically 65507 for IPv4)
    pub max_packet_size: usize,
}

impl NetworkTransportConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let addr_str = params
            .get("addr")
            .ok_or_else(|| "missing 'addr' parameter".to_string())?;

        let addr: SocketAddr = addr_str
            .parse()
            .map_err(|e| format!("invalid address '{}': {}", addr_str, e))?;

        let qos = match params.get("qos") {
            Some(raw) => match raw.parse::<u8>() {
                Ok(qos) if qos <= 2 => qos,
                _ => return Err(format!("invalid qos '{}', expected 0, 1 or 2", raw)),
            },
            None => 1,
        };

        let retain = match params.get("retain").map(String::as_str) {
            Some("true") => true,
            Some("false") | None => false,
            Some(other) => return Err(format!("invalid retain '{}'", other)),
        };

        let max_packet_size = params
            .get("max_packet_size")
            .and_then(|s| s.parse().ok())
            .unwrap_or(65000);

        Ok(Self {
            addr,
            qos,
            retain,
            max_packet_size,
        })
    }
}

/// Transport that sends envelopes over UDP
pub struct NetworkTransport {
    name: String,
    config: NetworkTransportConfig,
    socket: UdpSocket,
}

impl NetworkTransport {
    /// Bind an ephemeral local port and connect it to the bridge
    #[instrument(name = "network_transport_new", skip(name, config))]
    pub async fn new(
        name: impl Into<String>,
        config: NetworkTransportConfig,
    ) -> std::io::Result<Self> {
        let name = name.into();
        let bind_addr = if config.addr.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(&config.addr).await?;

        debug!(transport = %name, target = %config.addr, "NetworkTransport connected");

        Ok(Self {
            name,
            config,
            socket,
        })
    }

    /// Create from params (for factory)
    #[instrument(name = "network_transport_from_params", skip(name, params))]
    pub async fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let config = NetworkTransportConfig::from_params(params)
            .map_err(|e| ContractError::transport_connection(&name, e))?;

        Self::new(name.clone(), config)
            .await
            .map_err(|e| ContractError::transport_connection(&name, e.to_string()))
    }

    fn encode(&self, topic: &str, payload: &[u8]) -> Result<Vec<u8>, ContractError> {
        let payload = std::str::from_utf8(payload)
            .map_err(|e| ContractError::publish(&self.name, topic, format!("payload not utf-8: {e}")))?;

        let envelope = Envelope {
            topic: topic.to_string(),
            payload: payload.to_string(),
            qos: self.config.qos,
            retain: self.config.retain,
        };
        let data = serde_json::to_vec(&envelope)
            .map_err(|e| ContractError::publish(&self.name, topic, format!("json error: {e}")))?;

        if data.len() > self.config.max_packet_size {
            return Err(ContractError::publish(
                &self.name,
                topic,
                format!(
                    "datagram of {} bytes exceeds max_packet_size {}",
                    data.len(),
                    self.config.max_packet_size
                ),
            ));
        }
        Ok(data)
    }
}

impl PanelTransport for NetworkTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "network_transport_publish",
        skip(self, payload),
        fields(transport = %self.name, target = %self.config.addr)
    )]
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), ContractError> {
        let data = self.encode(topic, &payload)?;
        let sent = self
            .socket
            .send(&data)
            .await
            .map_err(|e| ContractError::publish(&self.name, topic, e.to_string()))?;

        debug!(transport = %self.name, topic, bytes = sent, "Datagram sent");
        Ok(())
    }
}
