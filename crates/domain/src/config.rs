//! Configuration management

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub directory: DirectoryConfig,
    pub sync: SyncConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Remote user-directory API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "syncline.db".to_string(),
                pool_size: 8,
            },
            directory: DirectoryConfig {
                base_url: "https://dummyjson.com".to_string(),
                timeout_seconds: 60,
            },
            sync: SyncConfig { enabled: true },
        }
    }
}
