//! Layered error definitions
//!
//! Categorized by source: config / transport / wire / general

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Transport Errors =====
    /// Publish to a topic failed
    #[error("transport '{transport}' publish to '{topic}' failed: {message}")]
    Publish {
        transport: String,
        topic: String,
        message: String,
    },

    /// Transport could not be set up or lost its connection
    #[error("transport '{transport}' connection error: {message}")]
    TransportConnection { transport: String, message: String },

    // ===== Wire Errors =====
    /// Panel payload could not be encoded or decoded
    #[error("payload {operation} error: {source}")]
    PayloadCodec {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create publish error
    pub fn publish(
        transport: impl Into<String>,
        topic: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Publish {
            transport: transport.into(),
            topic: topic.into(),
            message: message.into(),
        }
    }

    /// Create transport connection error
    pub fn transport_connection(transport: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportConnection {
            transport: transport.into(),
            message: message.into(),
        }
    }
}
