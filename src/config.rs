//! Configuration management for radiotui
//!
//! Handles config file loading/saving and setting resolution.
//! Config is stored at ~/.config/radiotui/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::radio_browser::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::search::DEFAULT_DEBOUNCE;
use crate::stream::PlayerType;

/// Environment variable overriding the directory mirror
pub const API_URL_ENV: &str = "RADIOTUI_API_URL";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Radio Browser mirror base URL
    pub api_url: Option<String>,
    /// Stations per directory page
    pub page_size: Option<u32>,
    /// Search debounce in milliseconds
    pub debounce_ms: Option<u64>,
    /// Preferred player (mpv, vlc)
    pub player: Option<PlayerType>,
    /// Favorites file location
    pub favorites_path: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/radiotui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("radiotui").join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    /// Load config from an explicit file, or return default if not found or
    /// unparseable
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Directory base URL with fallback chain:
    /// 1. Explicit override (command line)
    /// 2. Environment variable RADIOTUI_API_URL
    /// 3. Config file
    /// 4. Public default mirror
    pub fn api_url(&self, cli: Option<&str>) -> String {
        if let Some(url) = cli {
            return url.to_string();
        }
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return url;
            }
        }
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Stations per page, kept within 1..=MAX_PAGE_SIZE
    pub fn page_size(&self, cli: Option<u32>) -> u32 {
        cli.or(self.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn debounce(&self, cli_ms: Option<u64>) -> Duration {
        cli_ms
            .or(self.debounce_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE)
    }

    pub fn player(&self, cli: Option<PlayerType>) -> PlayerType {
        cli.or(self.player).unwrap_or_default()
    }

    /// Favorites file: explicit override, then config, then the default
    /// location
    pub fn favorites_path(&self, cli: Option<&Path>) -> Option<PathBuf> {
        cli.map(Path::to_path_buf)
            .or_else(|| self.favorites_path.clone())
            .or_else(crate::favorites::JsonFileStorage::default_path)
    }
}
