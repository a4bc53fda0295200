//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB configuration.
    pub tmdb: TmdbSettings,
    /// Douban configuration.
    pub douban: DoubanSettings,
    /// Batch defaults.
    pub batch: BatchSettings,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbSettings {
    /// Read access token (v4) or API key (v3).
    pub token: Option<String>,
    /// Local language for searches and posters.
    pub language: String,
    /// API base URL.
    pub api_base: String,
    /// Image base URL poster paths are appended to.
    pub image_base: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

/// Douban configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubanSettings {
    /// Subject lookup base URL; the Douban ID is appended.
    pub api_base: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

/// Batch defaults, overridable from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Seconds to sleep between entries.
    pub sleep: f64,
    /// Write the record file every N entries.
    pub save_every: usize,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            token: None,
            language: "zh-CN".to_string(),
            api_base: "https://api.themoviedb.org/3".to_string(),
            image_base: "https://image.tmdb.org/t/p/original".to_string(),
            timeout: 25,
        }
    }
}

impl Default for DoubanSettings {
    fn default() -> Self {
        Self {
            api_base: "https://douban-api.edui.fun/v2/movie/subject/".to_string(),
            timeout: 25,
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            sleep: 0.25,
            save_every: 10,
        }
    }
}

impl TmdbSettings {
    /// Resolve the token: explicit value, then environment, then config file.
    pub fn resolve_token(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| std::env::var("TMDB_TOKEN").ok())
            .or_else(|| std::env::var("TMDB_API_KEY").ok())
            .or_else(|| self.token.clone())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("watched_enricher")
}

/// Load configuration from file.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&config_path) {
            match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring invalid config {:?}: {}", config_path, e),
            }
        }
    }

    Config::default()
}
