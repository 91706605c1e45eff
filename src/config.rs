use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Fetch-related constants
// =============================================================================

/// Timeout for a single descriptor fetch in milliseconds (10 seconds)
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Delay between starting each fetch request to avoid hammering one host (10ms)
pub const DEFAULT_FETCH_STAGGER_MS: u64 = 10;

/// User agent sent with every descriptor request
pub const DEFAULT_USER_AGENT: &str = "mod-version-check";

/// Location of the version descriptor inside a mod directory
pub const DEFAULT_DESCRIPTOR_PATH: &str = "About/Version.xml";

const APP_DIR: &str = "mod-version-check";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Checker configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    pub fetch: FetchConfig,
    /// Descriptor path relative to each mod directory
    pub descriptor_path: PathBuf,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            descriptor_path: PathBuf::from(DEFAULT_DESCRIPTOR_PATH),
        }
    }
}

/// Network fetch configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    pub timeout_ms: u64,
    pub stagger_ms: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            stagger_ms: DEFAULT_FETCH_STAGGER_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

impl CheckerConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, otherwise the default config file if it
    /// exists, otherwise built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = config_path();
                if path.is_file() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Returns the path to the data directory for mod-version-check.
/// Uses $XDG_DATA_HOME/mod-version-check if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/mod-version-check,
/// or ./mod-version-check if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("mod-version-check.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_DIR)
}
