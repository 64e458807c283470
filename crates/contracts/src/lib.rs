//! # Contracts
//!
//! Shared interface contracts for the panel notification workspace.
//! Every other crate depends on this one; it depends on none of them.
//!
//! ## Wire model
//! - A panel is a named destination bound to a transport topic
//! - A notification is serialised once as `{"msg": ..., "opt": ...}` and
//!   published to the topic of every resolved panel

mod config;
mod error;
mod outcome;
mod panel;
mod payload;
mod request;
mod transport;

pub use config::*;
pub use error::*;
pub use outcome::*;
pub use panel::{Panel, PanelName};
pub use payload::{has_content, Payload};
pub use request::*;
pub use transport::*;
