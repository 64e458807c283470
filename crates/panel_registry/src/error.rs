//! Registry error types

use thiserror::Error;

/// Rejected registry mutation. The registry is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A panel with this name already exists
    #[error("panel '{name}' already exists")]
    DuplicateName { name: String },

    /// A field was empty after trimming
    #[error("panel {field} cannot be empty")]
    InvalidField { field: &'static str },

    /// No panel with this name
    #[error("panel '{name}' not found")]
    NotFound { name: String },

    /// Position outside the current list
    #[error("panel index {index} out of range (registry holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl RegistryError {
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}
