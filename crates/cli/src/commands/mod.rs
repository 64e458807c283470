//! Command implementations.

mod info;
mod panels;
mod send;
mod validate;

pub use info::run_info;
pub use panels::run_panels;
pub use send::run_send;
pub use validate::run_validate;
