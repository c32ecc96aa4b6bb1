use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::currency::CurrencyCode;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RatesConfig {
    #[serde(default = "default_rates_base_url")]
    pub base_url: String,
    /// Cached exchange rates stay fresh for this many minutes.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
}

fn default_rates_base_url() -> String {
    "https://api.frankfurter.app".to_string()
}

fn default_ttl_minutes() -> u64 {
    30
}

impl Default for RatesConfig {
    fn default() -> Self {
        RatesConfig {
            base_url: default_rates_base_url(),
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

impl RatesConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes * 60)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rates: RatesConfig,
    /// Currency every catalog price is stored in. Other currencies are
    /// presentation-only conversions.
    #[serde(default = "default_base_currency")]
    pub base_currency: CurrencyCode,
    /// The single demo user that owns the cart.
    #[serde(default = "default_demo_user")]
    pub demo_user: String,
    /// Overrides the platform data directory for the document store.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_base_currency() -> CurrencyCode {
    CurrencyCode::Inr
}

fn default_demo_user() -> String {
    "demo-user-123".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server: ServerConfig::default(),
            rates: RatesConfig::default(),
            base_currency: default_base_currency(),
            demo_user: default_demo_user(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads the config file from its default location, falling back to
    /// built-in defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            debug!("No config file at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "vibe", "vibe-commerce")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "vibe", "vibe-commerce")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Directory the document store lives in.
    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_path(),
        }
    }
}
