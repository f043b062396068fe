mod defaults;
mod types;
mod validation;

pub use defaults::*;
pub use types::*;
pub use validation::*;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level configuration for the gateway client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayCredentials,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from file, environment, and defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.map(PathBuf::from).or_else(find_config_file);

        let mut config = match config_path {
            Some(ref p) if p.exists() => {
                info!("Loading config from {}", p.display());
                load_config_file(p)?
            }
            Some(ref p) if path.is_some() => {
                anyhow::bail!("Config file '{}' does not exist", p.display())
            }
            _ => {
                info!("No config file found, using defaults");
                Config::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Write default configuration to a file.
    pub fn write_default(path: &str) -> Result<()> {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write '{path}'"))?;
        Ok(())
    }

    /// Apply `WAWEBJS_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("WAWEBJS_URL") {
            self.gateway.url = url;
        }

        if let Some(session) = lookup("WAWEBJS_SESSION") {
            self.gateway.session = session;
        }

        if let Some(key) = lookup("WAWEBJS_API_KEY") {
            self.gateway.api_key = Some(key);
        }

        if let Some(secs) = lookup("WAWEBJS_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.http.timeout_secs = secs;
            }
        }
    }
}

/// Find the configuration file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    let candidates = ["json", "json5", "yaml", "yml", "toml"]
        .map(|ext| PathBuf::from(format!("{CONFIG_FILE_STEM}.{ext}")));

    for path in &candidates {
        if path.exists() {
            return Some(path.clone());
        }
    }

    // Check home directory
    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".wawebjs").join("config.json");
        if home_config.exists() {
            return Some(home_config);
        }
    }

    None
}

/// Load configuration from a file path.
fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => {
            // Try JSON5 first, then regular JSON
            json5::from_str(&content).or_else(|_| {
                serde_json::from_str(&content).map_err(|e| json5::Error::Message {
                    msg: e.to_string(),
                    location: None,
                })
            })?
        }
    };

    Ok(config)
}
