//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes the working directory for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SYNCLINE_DB_PATH`: Database file path
//! - `SYNCLINE_DB_POOL_SIZE`: Connection pool size
//! - `SYNCLINE_DIRECTORY_BASE_URL`: Base URL of the remote user directory
//! - `SYNCLINE_DIRECTORY_TIMEOUT`: Request timeout in seconds
//! - `SYNCLINE_SYNC_ENABLED`: Whether sync is enabled (true/false)

use std::path::{Path, PathBuf};

use syncline_domain::{
    Config, DatabaseConfig, DirectoryConfig, Result, SyncConfig, SynclineError,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SynclineError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `SynclineError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("SYNCLINE_DB_PATH")?;
    let db_pool_size = env_var("SYNCLINE_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| SynclineError::Config(format!("Invalid pool size: {}", e)))
    })?;

    let directory_base_url = env_var("SYNCLINE_DIRECTORY_BASE_URL")?;
    let directory_timeout = env_var("SYNCLINE_DIRECTORY_TIMEOUT").and_then(|s| {
        s.parse::<u64>().map_err(|e| SynclineError::Config(format!("Invalid timeout: {}", e)))
    })?;

    let sync_enabled = env_bool("SYNCLINE_SYNC_ENABLED", true);

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        directory: DirectoryConfig {
            base_url: directory_base_url,
            timeout_seconds: directory_timeout,
        },
        sync: SyncConfig { enabled: sync_enabled },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the working directory for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SynclineError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SynclineError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SynclineError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SynclineError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SynclineError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SynclineError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SynclineError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the working directory for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let candidates = [
        cwd.join("config.toml"),
        cwd.join("config.json"),
        cwd.join("syncline.toml"),
        cwd.join("syncline.json"),
    ];

    candidates.into_iter().find(|p| p.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| SynclineError::Config(format!("Missing environment variable: {}", name)))
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1").unwrap_or(default)
}
