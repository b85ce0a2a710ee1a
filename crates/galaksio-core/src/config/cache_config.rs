//! Detection result cache configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the per-history detection cache.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable caching of detection results. Default: true.
    pub enabled: Option<bool>,
    /// Maximum cached histories. Default: 1000.
    pub max_entries: Option<u64>,
    /// Time-to-live for a cached result in seconds. Default: 300.
    pub ttl_secs: Option<u64>,
}

impl CacheConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_max_entries(&self) -> u64 {
        self.max_entries.unwrap_or(1000)
    }

    pub fn effective_ttl_secs(&self) -> u64 {
        self.ttl_secs.unwrap_or(300)
    }
}
