use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Context, OptionExt, Result};
use serde::{Deserialize, Serialize};

/// The catalog's well-known ID for the signed-in user's "Watch later" queue.
pub const WATCH_LATER_PLAYLIST_ID: &str = "WL";

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub playlists: PlaylistsConfig,
    #[serde(default)]
    pub youtube: YoutubeConfig,
    #[serde(rename = "1password", default)]
    pub onepassword: OnePasswordConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsConfig {
    #[serde(default = "default_watch_later_id")]
    pub watch_later_id: String,
    #[serde(alias = "target_id", default)]
    pub target_unlisted_id: Option<String>,
}

impl Default for PlaylistsConfig {
    fn default() -> Self {
        Self {
            watch_later_id: default_watch_later_id(),
            target_unlisted_id: None,
        }
    }
}

fn default_watch_later_id() -> String {
    WATCH_LATER_PLAYLIST_ID.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YoutubeConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Per-request timeout, e.g. "30s" or "1m"
    #[serde(default)]
    pub timeout: Option<String>,
}

/// 1Password secret references (`op://vault/item/field`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnePasswordConfig {
    #[serde(default)]
    pub youtube_api_key: Option<String>,
    #[serde(default)]
    pub youtube_access_token: Option<String>,
}

impl Config {
    /// Load config from a TOML file, or JSON when the extension is `.json`
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: Config = if is_json {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        };
        Ok(config)
    }

    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("watch-later-sync").join("config.toml"))
    }

    /// Load config from `path` (or the default location), falling back to
    /// defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path().ok_or_eyre("Could not determine a config directory")?,
        };

        if !path.exists() {
            log::warn!("Config file not found at {}", path.display());
            log::warn!("Using default config values.");
            return Ok(Self::default());
        }

        log::debug!("Loading config from {}", path.display());
        Self::from_file(&path)
    }

    pub fn source_playlist_id(&self) -> &str {
        &self.playlists.watch_later_id
    }

    /// The target playlist has no default; its absence is fatal.
    pub fn target_playlist_id(&self) -> Result<&str> {
        self.playlists
            .target_unlisted_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_eyre(
                "Target playlist ID not specified in config. \
                 Set `playlists.target_unlisted_id` to a valid playlist ID.",
            )
    }

    pub fn api_base_url(&self) -> &str {
        self.youtube
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        match self.youtube.timeout.as_deref() {
            Some(timeout) => humantime::parse_duration(timeout)
                .with_context(|| format!("Invalid youtube.timeout value: {timeout}")),
            None => Ok(DEFAULT_TIMEOUT),
        }
    }
}
