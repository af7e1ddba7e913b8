use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "SHRUBBERY_CONFIG";

/// Server settings, fixed at startup.
///
/// Every field has a default, so an empty YAML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the listener binds to
    pub listen_addr: String,

    /// Directory resources are served from
    pub root: PathBuf,

    /// Largest request head accepted before answering 400
    pub max_request_bytes: usize,

    /// How long a client may take to send its request head
    pub read_timeout_secs: u64,

    /// Upper bound on a connection up to the point its response is ready
    pub connection_timeout_secs: u64,

    /// Handle connections in parallel tasks instead of one at a time
    pub concurrent: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:10000".to_string(),
            root: PathBuf::from("webroot"),
            max_request_bytes: 8192,
            read_timeout_secs: 10,
            connection_timeout_secs: 30,
            concurrent: true,
        }
    }
}

impl Config {
    /// Loads the config from `SHRUBBERY_CONFIG` (if set), then applies the
    /// `LISTEN` and `WEBROOT` environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.listen_addr = listen_addr;
        }
        if let Some(root) = std::env::var_os("WEBROOT") {
            cfg.root = PathBuf::from(root);
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // serde_yaml rejects an empty document, which should mean "all defaults"
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg = serde_yaml::from_str(text).context("Failed to parse YAML config")?;
        Ok(cfg)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }
}
