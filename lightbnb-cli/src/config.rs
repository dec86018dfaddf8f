//! Configuration loading: `.env` files and the optional TOML config
//!
//! Precedence for the database URL (highest first):
//! 1. `--database-url`
//! 2. `DATABASE_URL` (environment or `.env`)
//! 3. `[database] url` in the TOML config
//! 4. built-in default

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lightbnb_db::{DatabaseConfig, DEFAULT_LIMIT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.lightbnb/.env
pub fn load_dotenv() -> Result<()> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(format!("current directory ({})", path.display()));
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy doesn't overwrite existing vars
            match dotenvy::from_path(&env_file) {
                Ok(_) => loaded_from.push(format!("~/.lightbnb/.env ({})", env_file.display())),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.lightbnb)");
    } else {
        info!("Loaded environment from: {}", loaded_from.join(", "));
    }

    Ok(())
}

/// Get the lightbnb config directory path (~/.lightbnb)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lightbnb"))
}

/// Default TOML config path (~/.lightbnb/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightbnbConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Rows returned by `search` and `reservations` without `--limit`
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

impl LightbnbConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `~/.lightbnb/config.toml` is
    /// read if present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid TOML")
    }

    /// Database settings after applying environment and CLI overrides.
    pub fn database_config(&self, cli_url: Option<&str>) -> DatabaseConfig {
        let mut db = self.database.clone().with_env_overrides();
        if let Some(url) = cli_url {
            db.url = url.to_owned();
        }
        db
    }
}
