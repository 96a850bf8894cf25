//! Optional TOML configuration file
//!
//! Every key is optional. Values given on the command line take precedence
//! over values from the file.
//!
//! ```toml
//! data_file = "/home/me/notes/checklist.json"
//! sync_git = true
//! log_filter = "checklist_mcp=debug"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the JSON data file
    pub data_file: Option<PathBuf>,
    /// Commit every save to the git repository containing the data file
    pub sync_git: bool,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(toml::from_str(&content)?)
    }

    /// Merge command line values over the file values
    pub fn with_overrides(mut self, data_file: Option<PathBuf>, sync_git: bool) -> Self {
        if data_file.is_some() {
            self.data_file = data_file;
        }
        self.sync_git |= sync_git;
        self
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or("info")
    }
}
