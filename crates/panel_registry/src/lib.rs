//! # Panel Registry
//!
//! Ordered, name-keyed collection of panels for one configuration scope.
//!
//! Responsibilities:
//! - Validate and store panels (trimmed, unique names)
//! - Remove panels by name or by position
//! - Hand out immutable snapshots for listing and target resolution

mod error;
mod registry;
mod snapshot;

pub use contracts::{Panel, PanelName};
pub use error::RegistryError;
pub use registry::PanelRegistry;
pub use snapshot::PanelSnapshot;
