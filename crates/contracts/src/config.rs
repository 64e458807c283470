//! NotifierConfig - Config Loader output
//!
//! Describes one configuration scope: its panels, the transport used to reach
//! them, and dispatch tuning.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration file version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete configuration of one notifier instance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Transport settings
    #[serde(default)]
    pub transport: TransportConfig,

    /// Dispatch settings
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Registered panels, in insertion order
    #[serde(default)]
    pub panels: Vec<PanelConfig>,
}

/// Persisted panel entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub name: String,
    pub topic: String,
}

/// Transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Transport name (used in logs)
    #[serde(default = "default_transport_name")]
    pub name: String,

    /// Transport kind
    #[serde(default)]
    pub kind: TransportKind,

    /// Kind-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            name: default_transport_name(),
            kind: TransportKind::default(),
            params: HashMap::new(),
        }
    }
}

fn default_transport_name() -> String {
    "default".to_string()
}

/// Transport kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Log every publish via tracing
    #[default]
    Log,
    /// Append payloads to files laid out by topic
    File,
    /// UDP datagrams towards a broker bridge
    Network,
}

/// How the dispatcher drives the publishes of one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanOut {
    /// One publish after another, in resolution order
    #[default]
    Sequential,
    /// All publishes in flight together
    Concurrent,
}

/// Dispatch tuning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub fan_out: FanOut,

    /// Per-publish timeout in milliseconds (absent = wait indefinitely)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_timeout_ms: Option<u64>,
}
