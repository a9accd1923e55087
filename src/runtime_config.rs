// =============================================================================
// Runtime Configuration — analyzer settings with serde field defaults
// =============================================================================
//
// Loaded from a JSON file at startup; a missing file falls back to defaults.
// Every field carries `#[serde(default)]` so adding new fields never breaks
// loading an older config file. `PULSE_*` environment variables override the
// file on top.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_provider_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_history_range() -> String {
    "6mo".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Address the REST API listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the market-data provider.
    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: String,

    /// History range passed to the provider, in its own syntax.
    #[serde(default = "default_history_range")]
    pub history_range: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            provider_base_url: default_provider_base_url(),
            history_range: default_history_range(),
        }
    }
}

impl RuntimeConfig {
    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        info!(path = %path.display(), "runtime config loaded");
        Ok(config)
    }

    /// Apply `PULSE_*` environment overrides on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var("PULSE_BIND_ADDR") {
            if !addr.trim().is_empty() {
                self.bind_addr = addr;
            }
        }
        if let Ok(url) = std::env::var("PULSE_PROVIDER_BASE_URL") {
            if !url.trim().is_empty() {
                self.provider_base_url = url;
            }
        }
        if let Ok(range) = std::env::var("PULSE_HISTORY_RANGE") {
            if !range.trim().is_empty() {
                self.history_range = range;
            }
        }
    }
}
