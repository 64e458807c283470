//! Configuration validation
//!
//! Rules:
//! - panel names and topics are non-empty after trimming
//! - panel names are unique after trimming
//! - transport name is non-empty
//! - publish timeout, when set, is > 0

use std::collections::HashSet;

use contracts::{ContractError, NotifierConfig};

/// Validate a NotifierConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &NotifierConfig) -> Result<(), ContractError> {
    validate_panel_fields(config)?;
    validate_panel_names(config)?;
    validate_transport(config)?;
    validate_dispatch(config)?;
    Ok(())
}

fn validate_panel_fields(config: &NotifierConfig) -> Result<(), ContractError> {
    for (idx, panel) in config.panels.iter().enumerate() {
        if panel.name.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("panels[{idx}].name"),
                "panel name cannot be empty",
            ));
        }
        if panel.topic.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("panels[{idx}].topic"),
                format!("topic of panel '{}' cannot be empty", panel.name.trim()),
            ));
        }
    }
    Ok(())
}

fn validate_panel_names(config: &NotifierConfig) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for panel in &config.panels {
        let name = panel.name.trim();
        if !seen.insert(name) {
            return Err(ContractError::config_validation(
                format!("panels[name={name}]"),
                "duplicate panel name",
            ));
        }
    }
    Ok(())
}

fn validate_transport(config: &NotifierConfig) -> Result<(), ContractError> {
    if config.transport.name.trim().is_empty() {
        return Err(ContractError::config_validation(
            "transport.name",
            "transport name cannot be empty",
        ));
    }
    Ok(())
}

fn validate_dispatch(config: &NotifierConfig) -> Result<(), ContractError> {
    if config.dispatch.publish_timeout_ms == Some(0) {
        return Err(ContractError::config_validation(
            "dispatch.publish_timeout_ms",
            "publish_timeout_ms must be > 0 when set",
        ));
    }
    Ok(())
}
