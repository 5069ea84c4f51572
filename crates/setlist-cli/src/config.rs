use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use setlist_search::{DEFAULT_LIMIT, DEFAULT_THRESHOLD};

/// Configuration for setlist.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SETLIST_* prefix)
/// 3. Config file (~/.config/setlist/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Index file used by `search` and `info`, and written by `build`.
    ///
    /// Can be set via:
    /// - CLI: -x / -o
    /// - ENV: SETLIST_INDEX_PATH
    /// - Default: ~/.local/share/setlist/songs.index
    pub index_path: PathBuf,

    /// Maximum number of search results.
    pub limit: usize,

    /// Minimum score (0-100) for a result to be shown.
    pub threshold: f64,

    /// Log filter used when RUST_LOG is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            limit: DEFAULT_LIMIT,
            threshold: DEFAULT_THRESHOLD,
            log_level: String::from("info"),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("setlist");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration")
    }
}

/// Get the default index path.
///
/// Returns: ~/.local/share/setlist/songs.index (or platform equivalent)
fn default_index_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("setlist")
        .join("songs.index")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/setlist/config.toml
/// - macOS: ~/Library/Application Support/setlist/config.toml
/// - Windows: %APPDATA%\setlist\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("setlist")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Setlist Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SETLIST_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Index file written by `setlist build` and read by `setlist search`
#
# Can also be set via:
# - CLI: setlist search -x /custom/songs.index "query"
# - Environment: SETLIST_INDEX_PATH=/custom/songs.index
#
# Default: Platform-specific data directory
#index_path = "/path/to/songs.index"

# Maximum number of results per search (CLI: -k)
limit = 10

# Minimum score from 0 to 100 (CLI: -t)
threshold = 60.0

# Log filter when RUST_LOG is not set (error, warn, info, debug, trace)
log_level = "info"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}
