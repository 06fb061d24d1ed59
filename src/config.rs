//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\tag-minder\config.toml
//! - macOS: ~/Library/Application Support/tag-minder/config.toml
//! - Linux: ~/.config/tag-minder/config.toml
//!
//! Every setting has a default, so the file is optional and may be partial.
//! Command-line flags override whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ResultExt;

/// Public AcoustID test key. Fine for small personal runs; use your own key
/// for anything larger.
pub const DEFAULT_ACOUSTID_API_KEY: &str = "cSpUJKpD";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: Credentials,

    /// Remote lookup behaviour
    pub lookup: LookupConfig,

    /// Library settings
    pub library: LibraryConfig,
}

/// API credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// AcoustID API key for fingerprint lookups
    pub acoustid_api_key: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            acoustid_api_key: DEFAULT_ACOUSTID_API_KEY.to_string(),
        }
    }
}

/// What to do with the remaining fields of a file after a text search fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchErrorPolicy {
    /// Stop searching for this file; remaining fields fall through to the sentinel
    #[default]
    StopFile,
    /// Move on and try the next missing field
    SkipField,
}

/// Remote lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Run the fingerprint stage
    pub fingerprint: bool,

    /// Run the text-search stage
    pub text_search: bool,

    /// Fingerprint matches must score strictly above this (0.0 - 1.0)
    pub min_confidence: f32,

    /// Fetch the album from MusicBrainz when AcoustID has none
    pub use_musicbrainz: bool,

    /// Pause after each fingerprint lookup
    pub fingerprint_cooldown_ms: u64,

    /// Pause after each text search
    pub search_cooldown_ms: u64,

    /// Pause before each MusicBrainz album lookup (their limit is 1 req/sec)
    pub musicbrainz_delay_ms: u64,

    /// Per-request network timeout
    pub request_timeout_secs: u64,

    pub search_error_policy: SearchErrorPolicy,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            fingerprint: true,
            text_search: true,
            min_confidence: 0.5,
            use_musicbrainz: true,
            fingerprint_cooldown_ms: 1000,
            search_cooldown_ms: 500,
            musicbrainz_delay_ms: 1100,
            request_timeout_secs: 10,
            search_error_policy: SearchErrorPolicy::StopFile,
        }
    }
}

impl LookupConfig {
    pub fn fingerprint_cooldown(&self) -> Duration {
        Duration::from_millis(self.fingerprint_cooldown_ms)
    }

    pub fn search_cooldown(&self) -> Duration {
        Duration::from_millis(self.search_cooldown_ms)
    }

    pub fn musicbrainz_delay(&self) -> Duration {
        Duration::from_millis(self.musicbrainz_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Library settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Directory processed when none is given on the command line.
    /// A leading `~` is expanded to the home directory.
    pub default_path: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            default_path: "~/mp3-metadata-poc".to_string(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tag-minder"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path. Unlike [`load`], failures are
/// returned: the user asked for this file.
pub fn load_from(path: &Path) -> crate::error::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(format!("Failed to read config file {}", path.display()))?;
    let config = toml::from_str(&contents)
        .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

// ============================================================================
// Tests
// ============================================================================
