//! `info` command implementation.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use contracts::{FanOut, NotifierConfig, PanelConfig, TransportKind};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo<'a> {
    version: String,
    transport: TransportInfo<'a>,
    dispatch: DispatchInfo,
    panels: &'a [PanelConfig],
}

#[derive(Serialize)]
struct TransportInfo<'a> {
    name: &'a str,
    kind: TransportKind,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    params: BTreeMap<&'a str, &'a str>,
}

#[derive(Serialize)]
struct DispatchInfo {
    fan_out: FanOut,
    #[serde(skip_serializing_if = "Option::is_none")]
    publish_timeout_ms: Option<u64>,
}

/// Execute the `info` command
pub fn run_info(config_path: &Path, args: &InfoArgs) -> Result<()> {
    info!(config = %config_path.display(), "Loading configuration info");

    if !config_path.exists() {
        anyhow::bail!("Configuration file not found: {}", config_path.display());
    }

    let config = config_loader::ConfigLoader::load_from_path(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&build_config_info(&config))
            .context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&config);
    }

    Ok(())
}

fn build_config_info(config: &NotifierConfig) -> ConfigInfo<'_> {
    ConfigInfo {
        version: format!("{:?}", config.version),
        transport: TransportInfo {
            name: &config.transport.name,
            kind: config.transport.kind,
            params: config
                .transport
                .params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
        },
        dispatch: DispatchInfo {
            fan_out: config.dispatch.fan_out,
            publish_timeout_ms: config.dispatch.publish_timeout_ms,
        },
        panels: &config.panels,
    }
}

fn branch(index: usize, len: usize) -> &'static str {
    if index + 1 == len {
        "└─"
    } else {
        "├─"
    }
}

fn print_config_info(config: &NotifierConfig) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 panelcast Configuration                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let transport = &config.transport;
    println!("📡 Transport");
    println!("   ├─ Version: {:?}", config.version);
    println!("   ├─ Name: {}", transport.name);
    let params: BTreeMap<_, _> = transport.params.iter().collect();
    if params.is_empty() {
        println!("   └─ Kind: {:?}", transport.kind);
    } else {
        println!("   ├─ Kind: {:?}", transport.kind);
        println!("   └─ Params");
        for (i, (key, value)) in params.iter().enumerate() {
            println!("      {} {} = {}", branch(i, params.len()), key, value);
        }
    }

    let dispatch = &config.dispatch;
    println!("\n⚙️  Dispatch");
    println!("   ├─ Fan-out: {:?}", dispatch.fan_out);
    match dispatch.publish_timeout_ms {
        Some(ms) => println!("   └─ Publish timeout: {} ms", ms),
        None => println!("   └─ Publish timeout: none"),
    }

    println!("\n📟 Panels ({})", config.panels.len());
    for (i, panel) in config.panels.iter().enumerate() {
        println!(
            "   {} {} → {}",
            branch(i, config.panels.len()),
            panel.name,
            panel.topic
        );
    }

    println!();
}
