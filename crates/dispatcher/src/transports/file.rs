//! FileTransport - appends payloads to files laid out by topic
//!
//! Topic `home/panels/kitchen` maps to `<base_path>/home/panels/kitchen.log`,
//! one payload per line.

use bytes::Bytes;
use contracts::{ContractError, PanelTransport};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Configuration for FileTransport
#[derive(Debug, Clone)]
pub struct FileTransportConfig {
    /// Root directory for topic files
    pub base_path: PathBuf,
}

impl FileTransportConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let base_path = params
            .get("base_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./panels"));

        Self { base_path }
    }
}

/// Transport that writes each publish to a per-topic file
pub struct FileTransport {
    name: String,
    config: FileTransportConfig,
}

impl FileTransport {
    /// Create a new FileTransport, creating the base directory if needed
    pub fn new(name: impl Into<String>, config: FileTransportConfig) -> std::io::Result<Self> {
        fs::create_dir_all(&config.base_path)?;

        Ok(Self {
            name: name.into(),
            config,
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        Self::new(name, FileTransportConfig::from_params(params))
    }

    /// File that receives publishes for `topic`.
    pub fn topic_path(&self, topic: &str) -> Result<PathBuf, ContractError> {
        let segments: Vec<&str> = topic.split('/').collect();
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == ".." || s.contains('\\'))
        {
            return Err(ContractError::publish(
                &self.name,
                topic,
                format!("topic segment '{bad}' cannot be mapped to a file"),
            ));
        }

        let mut path = self.config.base_path.clone();
        if let Some((last, dirs)) = segments.split_last() {
            path.extend(dirs);
            path.push(format!("{last}.log"));
        }
        Ok(path)
    }

    fn append(&self, topic: &str, payload: &[u8]) -> Result<PathBuf, ContractError> {
        let path = self.topic_path(topic)?;
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
            let mut line = Vec::with_capacity(payload.len() + 1);
            line.extend_from_slice(payload);
            line.push(b'\n');
            file.write_all(&line)
        };

        write().map_err(|e| ContractError::publish(&self.name, topic, e.to_string()))?;
        Ok(path)
    }
}

impl PanelTransport for FileTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_transport_publish",
        skip(self, payload),
        fields(transport = %self.name, bytes = payload.len())
    )]
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), ContractError> {
        let path = self.append(topic, &payload)?;
        debug!(transport = %self.name, path = %path.display(), "Payload appended");
        Ok(())
    }
}
