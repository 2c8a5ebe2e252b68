//! Application configuration management.
//!
//! Handles loading and saving the client configuration: the backend base
//! URL and the last used username. Stored at
//! `~/.config/liftlog/config.json`; the base URL can be overridden with
//! the `LIFTLOG_API_URL` environment variable.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "liftlog";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default backend base URL (a local development server)
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Resolve the backend base URL: environment override, then config,
    /// then the default.
    pub fn api_base_url(&self) -> String {
        std::env::var("LIFTLOG_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// App-level cache directory. Session tokens live here: there is one
    /// logged-in user per machine account, and the token file must survive
    /// a change of `last_username`.
    pub fn base_cache_dir() -> Result<PathBuf> {
        let cache_dir =
            dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Per-user cache directory, so switching accounts doesn't mix cached
    /// resource data.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let mut path = Self::base_cache_dir()?;
        if let Some(ref username) = self.last_username {
            path = path.join(username);
        }
        Ok(path)
    }
}
