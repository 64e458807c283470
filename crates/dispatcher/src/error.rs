//! Dispatcher error types

use panel_registry::RegistryError;
use thiserror::Error;

/// Errors raised while assembling a notifier. Dispatching itself never
/// fails; per-target problems are reported in the outcome.
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Transport creation error
    #[error("failed to create transport '{name}': {message}")]
    TransportCreation { name: String, message: String },

    /// Configured panels could not be registered
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Contract error
    #[error("contract error: {0}")]
    Contract(#[from] contracts::ContractError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatcherError {
    /// Create a transport creation error
    pub fn transport_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
