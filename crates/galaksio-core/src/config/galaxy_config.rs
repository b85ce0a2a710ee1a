//! Galaxy server connection configuration.

use serde::{Deserialize, Serialize};

/// Default Galaxy server when none is configured.
pub const DEFAULT_GALAXY_SERVER: &str = "https://usegalaxy.org/";

/// Connection settings for the Galaxy API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Base URL of the Galaxy server. Default: `https://usegalaxy.org/`.
    pub server: Option<String>,
    /// API key sent as `x-api-key`. Usually supplied through the environment.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds. Default: 30.
    pub timeout_secs: Option<u64>,
}

impl GalaxyConfig {
    /// Returns the effective server URL without a trailing slash.
    pub fn effective_server(&self) -> String {
        self.server
            .as_deref()
            .unwrap_or(DEFAULT_GALAXY_SERVER)
            .trim_end_matches('/')
            .to_string()
    }

    /// Returns the effective request timeout, defaulting to 30 seconds.
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(30)
    }
}
