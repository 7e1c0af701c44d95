//! Client Configuration
//!
//! JSON file in the app config dir, overridden by environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::repository::DEFAULT_TIMEOUT;

pub const APP_DIR: &str = "menu-board";
pub const CONFIG_FILE: &str = "menu_board.json";
pub const ENV_API_URL: &str = "MENU_API_URL";
pub const ENV_TIMEOUT: &str = "MENU_API_TIMEOUT_SECS";

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout_secs: u64,
    /// Where the session token and identity are kept
    pub session_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let config_root = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        let data_root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            api_url: normalize_api_url("localhost"),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            session_dir: config_root.join(APP_DIR).join("session"),
            log_dir: data_root.join(APP_DIR).join("logs"),
        }
    }
}

impl ClientConfig {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Reads `path` (or the default location) when it exists, then applies
    /// the environment. A missing file is not an error; a broken one is.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(&p)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let mut config: ClientConfig = serde_json::from_str(&raw)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
        config.api_url = normalize_api_url(&config.api_url);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = normalize_api_url(&url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.timeout_secs = secs,
                _ => log::warn!("Ignoring {}={:?}, expected a positive number of seconds", ENV_TIMEOUT, raw),
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// A bare host means the backend on its default port over plain HTTP
pub fn normalize_api_url(raw: &str) -> String {
    let raw = raw.trim().trim_end_matches('/');
    if raw.contains("://") {
        raw.to_string()
    } else if raw.contains(':') {
        format!("http://{}", raw)
    } else {
        format!("http://{}:{}", raw, DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_api_url() {
        assert_eq!(normalize_api_url("localhost"), "http://localhost:3000");
        assert_eq!(normalize_api_url("10.0.0.4:8080"), "http://10.0.0.4:8080");
        assert_eq!(normalize_api_url("https://menus.example.org/"), "https://menus.example.org");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_file_then_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "api_url": "menus.local", "timeout_secs": 30 }"#).unwrap();

        let mut config = ClientConfig::from_file(&path).unwrap();
        assert_eq!(config.api_url, "http://menus.local:3000");
        assert_eq!(config.timeout_secs, 30);

        let env: HashMap<&str, &str> = [(ENV_API_URL, "kiosk-api"), (ENV_TIMEOUT, "abc")].into_iter().collect();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_url, "http://kiosk-api:3000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = ClientConfig {
            api_url: "http://menus.local:3000".into(),
            timeout_secs: 5,
            session_dir: dir.path().join("session"),
            log_dir: dir.path().join("logs"),
        };
        config.save(&path).unwrap();
        assert_eq!(ClientConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{").unwrap();
        assert!(ClientConfig::load(Some(&path)).is_err());
    }
}
