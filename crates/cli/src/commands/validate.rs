//! `validate` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use contracts::{NotifierConfig, TransportKind};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    transport: String,
    transport_kind: TransportKind,
    panel_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(config_path: &Path, args: &ValidateArgs) -> Result<()> {
    info!(config = %config_path.display(), "Validating configuration");

    let result = validate_config(config_path);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(path: &Path) -> ValidationResult {
    let config_path = path.display().to_string();

    if !path.exists() {
        return ValidationResult {
            valid: false,
            error: Some(format!("File not found: {}", config_path)),
            config_path,
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(path) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: (!warnings.is_empty()).then_some(warnings),
                summary: Some(ConfigSummary {
                    version: format!("{:?}", config.version),
                    transport: config.transport.name.clone(),
                    transport_kind: config.transport.kind,
                    panel_count: config.panels.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Non-fatal issues
fn collect_warnings(config: &NotifierConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.panels.is_empty() {
        warnings.push("No panels configured - notifications will reach nobody".to_string());
    }

    if config.transport.kind == TransportKind::Log {
        warnings.push("Log transport selected - payloads are only written to the log".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!(
                "  Transport: {} ({:?})",
                summary.transport, summary.transport_kind
            );
            println!("  Panels: {}", summary.panel_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
