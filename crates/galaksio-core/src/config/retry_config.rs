//! Retry/backoff configuration for Galaxy calls.

use serde::{Deserialize, Serialize};

/// Exponential backoff settings: delays run base, 2*base, 4*base, ...
/// capped at `max_delay_ms`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts including the first. Default: 3.
    pub max_attempts: Option<u32>,
    /// Delay before the first retry in milliseconds. Default: 2000.
    pub base_delay_ms: Option<u64>,
    /// Upper bound for any single delay in milliseconds. Default: 8000.
    pub max_delay_ms: Option<u64>,
}

impl RetryConfig {
    pub fn effective_max_attempts(&self) -> u32 {
        self.max_attempts.unwrap_or(3)
    }

    pub fn effective_base_delay_ms(&self) -> u64 {
        self.base_delay_ms.unwrap_or(2000)
    }

    pub fn effective_max_delay_ms(&self) -> u64 {
        self.max_delay_ms.unwrap_or(8000)
    }
}
