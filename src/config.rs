use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::quiz::gate::AttemptGate;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Runtime settings for the quiz frontend.
///
/// Every field has a default, so a partial JSON document (or none at all)
/// yields a usable configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub max_attempts: u32,
    pub completion_threshold: u32,
    pub pass_threshold: u32,
    pub fullscreen_delay_ms: u32,
    pub toast_ttl_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            max_attempts: 2,
            completion_threshold: 10,
            pass_threshold: 70,
            fullscreen_delay_ms: 300,
            toast_ttl_ms: 4000,
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Native builds read the file named by `QUIZ_CONFIG` when set. The API
    /// location baked in at build time via `QUIZ_API_BASE_URL` wins over
    /// both; on wasm it is the only override available.
    pub fn from_env() -> Self {
        #[allow(unused_mut)]
        let mut config = Self::default();

        #[cfg(not(target_arch = "wasm32"))]
        if let Ok(path) = std::env::var("QUIZ_CONFIG") {
            match Self::load(std::path::Path::new(&path)) {
                Ok(loaded) => config = loaded,
                Err(e) => warn!("Ignoring {}: {}", path, e),
            }
        }

        match option_env!("QUIZ_API_BASE_URL") {
            Some(url) => config.api_base_url = url.trim_end_matches('/').to_string(),
            None => info!("QUIZ_API_BASE_URL not set, using default: {}", DEFAULT_API_BASE_URL),
        }
        config
    }

    pub fn attempt_gate(&self) -> AttemptGate {
        AttemptGate {
            max_attempts: self.max_attempts,
            completion_threshold: self.completion_threshold,
            pass_threshold: self.pass_threshold,
        }
    }
}
