use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use job_core::ThemeMode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://empllo.com/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Host-supplied runtime settings. Every field has a default, so `{}` and the
/// empty string are both valid configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub theme_mode: ThemeMode,
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            platform: None,
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            theme_mode: ThemeMode::default(),
            log_filter: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl RuntimeConfig {
    pub fn from_json(config_json: &str) -> Result<Self> {
        if config_json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(config_json).context("invalid runtime config JSON")
    }

    pub fn platform(&self) -> String {
        self.platform
            .clone()
            .unwrap_or_else(|| std::env::consts::OS.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = self.data_dir.as_deref().filter(|dir| !dir.trim().is_empty()) {
            return PathBuf::from(dir);
        }

        if let Some(dir) = dirs::data_local_dir() {
            return dir.join("job-finder");
        }

        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".job-finder")
    }
}
