//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_ASSET_BASE_URL, DEFAULT_EVENTS_PER_CELL,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::error::{TaskdeskError, TaskdeskResult};

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_asset_base_url() -> String {
    DEFAULT_ASSET_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_events_per_cell() -> usize {
    DEFAULT_EVENTS_PER_CELL
}

/// Configuration at ~/.config/taskdesk/config.toml
///
/// Every key can be overridden with a `TASKDESK_`-prefixed environment
/// variable, e.g. `TASKDESK_API_BASE_URL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Where relative image paths returned by the API are served from.
    #[serde(default = "default_asset_base_url")]
    pub asset_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_events_per_cell")]
    pub calendar_events_per_cell: usize,

    /// Token file location; defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: default_api_base_url(),
            asset_base_url: default_asset_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            calendar_events_per_cell: default_events_per_cell(),
            token_path: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> TaskdeskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TaskdeskError::Config("Could not determine config directory".into()))?
            .join("taskdesk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings from the default location, writing a commented-out
    /// template there on first run.
    pub fn load() -> TaskdeskResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> TaskdeskResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("TASKDESK").try_parsing(true))
            .build()
            .map_err(|e| TaskdeskError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TaskdeskError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolved token file path, with `~` expanded.
    pub fn token_path(&self) -> TaskdeskResult<PathBuf> {
        match &self.token_path {
            Some(path) => Ok(PathBuf::from(
                shellexpand::tilde(&path.to_string_lossy()).into_owned(),
            )),
            None => Ok(dirs::data_dir()
                .ok_or_else(|| TaskdeskError::Config("Could not determine data directory".into()))?
                .join("taskdesk")
                .join("tokens.toml")),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TaskdeskResult<()> {
        let contents = format!(
            "\
# taskdesk configuration

# REST API the client talks to:
# api_base_url = \"{}\"

# Base URL for relative image paths:
# asset_base_url = \"{}\"

# Seconds before a request is abandoned:
# request_timeout_secs = {}

# Events listed per calendar day before \"+N more\":
# calendar_events_per_cell = {}

# Where the session tokens are stored:
# token_path = \"~/.local/share/taskdesk/tokens.toml\"
",
            DEFAULT_API_BASE_URL,
            DEFAULT_ASSET_BASE_URL,
            DEFAULT_REQUEST_TIMEOUT_SECS,
            DEFAULT_EVENTS_PER_CELL,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TaskdeskError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TaskdeskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
