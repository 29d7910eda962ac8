//! Settings-file bootstrap.
//!
//! A flat key/value TOML file, loaded once at startup. The kernel never sees
//! this type; it receives plain constructor parameters. If the file is
//! missing it is created with defaults so a first run leaves something to
//! edit, matching the settings keys the shell has always used: actor name,
//! host name, archive path, log file path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Startup settings for a shell session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Actor name recorded on every audit record.
    pub actor: String,
    /// Host name shown in the prompt.
    pub host: String,
    /// Archive to mount. May be overridden on the command line.
    pub archive: Option<PathBuf>,
    /// Where the audit log is flushed.
    pub log_file: PathBuf,
    /// Unpack into memory instead of a temporary directory.
    pub in_memory: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            actor: std::env::var("USER").unwrap_or_else(|_| "user".to_string()),
            host: "tarsh-vm".to_string(),
            archive: None,
            log_file: PathBuf::from("tarsh-log.json"),
            in_memory: false,
        }
    }
}

impl ReplConfig {
    /// Load the config file, creating it with defaults if absent.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let config = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?;
            Ok(config)
        } else {
            let config = Self::default();
            let raw = toml::to_string_pretty(&config).context("failed to serialize defaults")?;
            std::fs::write(path, raw)
                .with_context(|| format!("failed to create config {}", path.display()))?;
            info!(path = %path.display(), "created default config");
            Ok(config)
        }
    }
}
