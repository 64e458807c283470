//! `panels` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use contracts::{NotifierConfig, Panel};
use panel_registry::{PanelRegistry, PanelSnapshot};
use tracing::info;

use crate::cli::{AddPanelArgs, ListPanelsArgs, PanelCommands, RemovePanelArgs};

/// Execute a `panels` subcommand
pub fn run_panels(config_path: &Path, command: &PanelCommands) -> Result<()> {
    let mut config = ConfigLoader::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let registry = PanelRegistry::from_config(&config.panels)
        .context("Configured panels are inconsistent")?;

    match command {
        PanelCommands::Add(args) => {
            let panel = add_panel(&registry, args)?;
            persist(config_path, &mut config, &registry)?;
            println!("✓ Added panel {}", panel.label());
        }
        PanelCommands::Remove(args) => {
            let panel = remove_panel(&registry, args)?;
            persist(config_path, &mut config, &registry)?;
            println!("✓ Removed panel {}", panel.label());
        }
        PanelCommands::List(args) => list_panels(&registry.list(), args)?,
    }
    Ok(())
}

fn add_panel(registry: &PanelRegistry, args: &AddPanelArgs) -> Result<Panel> {
    registry
        .add(&args.name, &args.topic)
        .with_context(|| format!("Cannot add panel '{}'", args.name.trim()))
}

fn remove_panel(registry: &PanelRegistry, args: &RemovePanelArgs) -> Result<Panel> {
    match (&args.name, args.index) {
        (Some(name), _) => registry
            .remove(name)
            .with_context(|| format!("Cannot remove panel '{name}'")),
        (None, Some(index)) => registry
            .remove_by_index(index)
            .with_context(|| format!("Cannot remove panel at index {index}")),
        (None, None) => anyhow::bail!("Either a panel name or --index is required"),
    }
}

fn persist(path: &Path, config: &mut NotifierConfig, registry: &PanelRegistry) -> Result<()> {
    config.panels = registry.to_config();
    ConfigLoader::save_to_path(path, config)
        .with_context(|| format!("Failed to save config to {}", path.display()))?;
    info!(config = %path.display(), panels = config.panels.len(), "Registry saved");
    Ok(())
}

fn list_panels(snapshot: &PanelSnapshot, args: &ListPanelsArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(&snapshot.to_vec())
            .context("Failed to serialize panels")?;
        println!("{}", json);
        return Ok(());
    }

    if snapshot.is_empty() {
        println!("No panels configured");
        return Ok(());
    }

    println!("📟 Panels ({})", snapshot.len());
    for (index, panel) in snapshot.iter().enumerate() {
        println!("   [{}] {}", index, panel);
    }
    Ok(())
}
