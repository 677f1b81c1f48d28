//! Configuration loading.
//!
//! Settings come from built-in defaults, then an optional `config.json`,
//! then environment variables. The access token is only ever read from the
//! environment and is never serialized.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::constants::{
    DEFAULT_BOARD_URL, DEFAULT_COMPOSE_URL, ENV_BOARD_URL, ENV_COMPOSE_URL, ENV_CONFIG_DIR,
    ENV_MODEL, ENV_TOKEN,
};

/// Configuration for the vbcli client.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the board read/write service.
    pub board_url: String,
    /// Base URL of the compose service.
    pub compose_url: String,
    /// Access token - NOT serialized to disk.
    #[serde(skip)]
    pub token: String,
    /// Default model when `--model` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_url: DEFAULT_BOARD_URL.to_string(),
            compose_url: DEFAULT_COMPOSE_URL.to_string(),
            token: String::new(),
            model: None,
        }
    }
}

impl Config {
    /// Returns the directory that may hold `config.json`.
    ///
    /// `VBCLI_CONFIG_DIR` wins; otherwise the platform config directory
    /// (e.g. `~/.config/vbcli`).
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
            return Ok(PathBuf::from(dir));
        }
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join("vbcli"))
    }

    /// Loads configuration from file, with environment variable overrides.
    ///
    /// A missing config file is not an error; an unreadable or invalid one is.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_dir() {
            Ok(dir) => Self::load_from_file(&dir.join("config.json"))?,
            Err(e) => {
                log::debug!("Skipping config file: {:#}", e);
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads `path`, falling back to defaults if it does not exist.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = token.trim().to_string();
        }

        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            self.model = Some(model);
        }

        if let Some(board_url) = lookup(ENV_BOARD_URL).filter(|u| !u.trim().is_empty()) {
            self.board_url = board_url.trim().to_string();
        }

        if let Some(compose_url) = lookup(ENV_COMPOSE_URL).filter(|u| !u.trim().is_empty()) {
            self.compose_url = compose_url.trim().to_string();
        }
    }
}
