//! Top-level Galaksio configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CacheConfig, GalaxyConfig, PairingConfig, RetryConfig};
use crate::errors::ConfigError;

/// Project config file name looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "galaksio.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`GALAKSIO_*`, plus `GALAXY_SERVER` and
///    `AUTO_PAIR_CONFIDENCE_THRESHOLD`)
/// 3. Project config (`galaksio.toml` in the root)
/// 4. User config (`~/.galaksio/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GalaksioConfig {
    pub galaxy: GalaxyConfig,
    pub pairing: PairingConfig,
    pub cache: CacheConfig,
    pub retry: RetryConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub galaxy_server: Option<String>,
    pub confidence_threshold: Option<f64>,
    pub max_parallel: Option<usize>,
    pub no_cache: bool,
}

impl GalaksioConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only a parse error is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!("ignoring unreadable user config: {e}");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &GalaksioConfig) -> Result<(), ConfigError> {
        if let Some(ref server) = config.galaxy.server {
            if !(server.starts_with("http://") || server.starts_with("https://")) {
                return Err(ConfigError::ValidationFailed {
                    field: "galaxy.server".to_string(),
                    message: "must start with http:// or https://".to_string(),
                });
            }
        }
        if config.galaxy.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "galaxy.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(threshold) = config.pairing.confidence_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "pairing.confidence_threshold".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if config.pairing.max_parallel == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "pairing.max_parallel".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if config.cache.max_entries == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "cache.max_entries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.retry.max_attempts == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "retry.max_attempts".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if config.retry.effective_base_delay_ms() > config.retry.effective_max_delay_ms() {
            return Err(ConfigError::ValidationFailed {
                field: "retry.base_delay_ms".to_string(),
                message: "must not exceed retry.max_delay_ms".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.galaksio/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".galaksio").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut GalaksioConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: GalaksioConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut GalaksioConfig, other: &GalaksioConfig) {
        // Galaxy
        if other.galaxy.server.is_some() {
            base.galaxy.server = other.galaxy.server.clone();
        }
        if other.galaxy.api_key.is_some() {
            base.galaxy.api_key = other.galaxy.api_key.clone();
        }
        if other.galaxy.timeout_secs.is_some() {
            base.galaxy.timeout_secs = other.galaxy.timeout_secs;
        }

        // Pairing
        if other.pairing.confidence_threshold.is_some() {
            base.pairing.confidence_threshold = other.pairing.confidence_threshold;
        }
        if other.pairing.max_parallel.is_some() {
            base.pairing.max_parallel = other.pairing.max_parallel;
        }

        // Cache
        if other.cache.enabled.is_some() {
            base.cache.enabled = other.cache.enabled;
        }
        if other.cache.max_entries.is_some() {
            base.cache.max_entries = other.cache.max_entries;
        }
        if other.cache.ttl_secs.is_some() {
            base.cache.ttl_secs = other.cache.ttl_secs;
        }

        // Retry
        if other.retry.max_attempts.is_some() {
            base.retry.max_attempts = other.retry.max_attempts;
        }
        if other.retry.base_delay_ms.is_some() {
            base.retry.base_delay_ms = other.retry.base_delay_ms;
        }
        if other.retry.max_delay_ms.is_some() {
            base.retry.max_delay_ms = other.retry.max_delay_ms;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `GALAKSIO_GALAXY_SERVER`, `GALAKSIO_RETRY_MAX_ATTEMPTS`, etc.
    /// The bare `GALAXY_SERVER`, `GALAXY_API_KEY` and
    /// `AUTO_PAIR_CONFIDENCE_THRESHOLD` names are honoured too, with the
    /// prefixed form taking precedence.
    fn apply_env_overrides(config: &mut GalaksioConfig) {
        if let Some(val) = env_var(&["GALAKSIO_GALAXY_SERVER", "GALAXY_SERVER"]) {
            config.galaxy.server = Some(val);
        }
        if let Some(val) = env_var(&["GALAKSIO_GALAXY_API_KEY", "GALAXY_API_KEY"]) {
            config.galaxy.api_key = Some(val);
        }
        if let Some(v) = env_parse::<u64>(&["GALAKSIO_GALAXY_TIMEOUT_SECS"]) {
            config.galaxy.timeout_secs = Some(v);
        }
        if let Some(v) = env_parse::<f64>(&[
            "GALAKSIO_PAIRING_CONFIDENCE_THRESHOLD",
            "AUTO_PAIR_CONFIDENCE_THRESHOLD",
        ]) {
            config.pairing.confidence_threshold = Some(v);
        }
        if let Some(v) = env_parse::<usize>(&["GALAKSIO_PAIRING_MAX_PARALLEL"]) {
            config.pairing.max_parallel = Some(v);
        }
        if let Some(v) = env_parse::<bool>(&["GALAKSIO_CACHE_ENABLED"]) {
            config.cache.enabled = Some(v);
        }
        if let Some(v) = env_parse::<u64>(&["GALAKSIO_CACHE_MAX_ENTRIES", "CACHE_MAX_SIZE"]) {
            config.cache.max_entries = Some(v);
        }
        if let Some(v) = env_parse::<u64>(&["GALAKSIO_CACHE_TTL_SECS", "CACHE_DEFAULT_TTL"]) {
            config.cache.ttl_secs = Some(v);
        }
        if let Some(v) = env_parse::<u32>(&["GALAKSIO_RETRY_MAX_ATTEMPTS"]) {
            config.retry.max_attempts = Some(v);
        }
        if let Some(v) = env_parse::<u64>(&["GALAKSIO_RETRY_BASE_DELAY_MS"]) {
            config.retry.base_delay_ms = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut GalaksioConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.galaxy_server {
            config.galaxy.server = Some(v.clone());
        }
        if let Some(v) = cli.confidence_threshold {
            config.pairing.confidence_threshold = Some(v);
        }
        if let Some(v) = cli.max_parallel {
            config.pairing.max_parallel = Some(v);
        }
        if cli.no_cache {
            config.cache.enabled = Some(false);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// First set variable among `keys`, in order.
fn env_var(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| std::env::var(k).ok())
}

/// First variable among `keys` that is set and parses. Unparseable values
/// are skipped with a warning.
fn env_parse<T: std::str::FromStr>(keys: &[&str]) -> Option<T> {
    keys.iter().find_map(|k| {
        let raw = std::env::var(k).ok()?;
        match raw.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("ignoring unparseable value for {k}: {raw:?}");
                None
            }
        }
    })
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
