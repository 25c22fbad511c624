//! Application configuration management.
//!
//! This module handles loading and saving the client configuration, which
//! covers the backend base URL and the last used admin username.
//!
//! Configuration is stored at `~/.config/dispatch-admin/config.json`. The
//! base URL can be overridden per-run with the `DISPATCH_ADMIN_API_URL`
//! environment variable.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "dispatch-admin";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the configured base URL
const ENV_API_BASE_URL: &str = "DISPATCH_ADMIN_API_URL";

/// Default backend location for local development
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

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

    /// Base URL for the backend, resolved environment-first so a deploy can
    /// repoint the client without editing the config file.
    pub fn api_base_url(&self) -> String {
        resolve_base_url(
            std::env::var(ENV_API_BASE_URL).ok(),
            self.api_base_url.as_deref(),
        )
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding mutable client state, currently just the session
    /// file.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}

fn resolve_base_url(env_value: Option<String>, configured: Option<&str>) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| configured.map(|v| v.to_string()))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}
