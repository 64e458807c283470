//! # Config Loader
//!
//! Configuration loading, validation and persistence.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate panels and transport settings
//! - Produce a `NotifierConfig`
//! - Write the configuration back atomically after registry edits
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("panels.toml")).unwrap();
//! println!("Panels: {}", config.panels.len());
//! ```

mod parser;
mod validator;

pub use contracts::NotifierConfig;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;
use tracing::{debug, warn};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<NotifierConfig, ContractError> {
        let format = Self::detect_format(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from file path, or start from defaults when the
    /// file does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<NotifierConfig, ContractError> {
        Self::detect_format(path)?;
        if !path.exists() {
            debug!(path = %path.display(), "Config file absent, using defaults");
            return Ok(NotifierConfig::default());
        }
        Self::load_from_path(path)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<NotifierConfig, ContractError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }

    /// Validate and atomically write configuration to `path`.
    ///
    /// The content goes to a sibling `.tmp` file first and is then renamed
    /// over the target, so readers never observe a half-written file.
    pub fn save_to_path(path: &Path, config: &NotifierConfig) -> Result<(), ContractError> {
        let format = Self::detect_format(path)?;
        validator::validate(config)?;
        let content = parser::render(config, format)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut tmp_name = path
            .file_name()
            .ok_or_else(|| ContractError::config_parse("config path has no file name"))?
            .to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        std::fs::write(&tmp_path, content)?;
        if let Err(e) = std::fs::rename(&tmp_path, path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
                warn!(path = %tmp_path.display(), error = %cleanup, "Failed to remove temp config");
            }
            return Err(e.into());
        }

        debug!(
            path = %path.display(),
            panels = config.panels.len(),
            "Config saved"
        );
        Ok(())
    }

    /// Serialize NotifierConfig to TOML string
    pub fn to_toml(config: &NotifierConfig) -> Result<String, ContractError> {
        parser::render(config, ConfigFormat::Toml)
    }

    /// Serialize NotifierConfig to JSON string
    pub fn to_json(config: &NotifierConfig) -> Result<String, ContractError> {
        parser::render(config, ConfigFormat::Json)
    }

    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{PanelConfig, TransportKind};
    use tempfile::tempdir;

    const MINIMAL_TOML: &str = r#"
[transport]
kind = "file"
[transport.params]
base_path = "./out"

[[panels]]
name = "kitchen"
topic = "home/panels/kitchen"
"#;

    #[test]
    fn test_load_from_str_toml() {
        let config = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        assert_eq!(config.transport.kind, TransportKind::File);
        assert_eq!(config.panels[0].topic, "home/panels/kitchen");
    }

    #[test]
    fn test_toml_to_json_preserves_panels() {
        let config = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&config).unwrap();
        let reparsed = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(reparsed.panels, config.panels);
        assert_eq!(reparsed.transport.params, config.transport.params);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[[panels]]
name = "a"
topic = "t/a"

[[panels]]
name = "a"
topic = "t/b"
"#;
        let err = ConfigLoader::load_from_str(content, ConfigFormat::Toml).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("panels.toml");

        let mut config = NotifierConfig::default();
        config.panels.push(PanelConfig {
            name: "office".into(),
            topic: "home/panels/office".into(),
        });

        ConfigLoader::save_to_path(&path, &config).unwrap();
        assert!(!path.with_file_name("panels.toml.tmp").exists());

        let loaded = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(loaded.panels, config.panels);
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("panels.json");

        let mut config = NotifierConfig::default();
        config.panels.push(PanelConfig {
            name: "".into(),
            topic: "t".into(),
        });

        assert!(ConfigLoader::save_to_path(&path, &config).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let config = ConfigLoader::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert!(config.panels.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ConfigLoader::load_or_default(Path::new("panels.yaml")).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory at the target path makes the rename fail
        let path = dir.path().join("panelcast.toml");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let result = ConfigLoader::save_to_path(&path, &NotifierConfig::default());

        assert!(matches!(result, Err(ContractError::Io(_))));
        assert!(!dir.path().join("panelcast.toml.tmp").exists());
        assert!(path.join("keep").exists());
    }
}
