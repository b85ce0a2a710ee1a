//! Paired-read detection and auto-pairing configuration.

use serde::{Deserialize, Serialize};

/// Configuration for auto-pairing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PairingConfig {
    /// Minimum confidence for automatic collection creation. Default: 0.70.
    pub confidence_threshold: Option<f64>,
    /// Concurrent collection-creation calls. Default: 1 (serial).
    pub max_parallel: Option<usize>,
}

impl PairingConfig {
    /// Returns the effective auto-pair threshold, defaulting to 0.70.
    pub fn effective_confidence_threshold(&self) -> f64 {
        self.confidence_threshold.unwrap_or(0.70)
    }

    /// Returns the effective parallelism, defaulting to 1.
    pub fn effective_max_parallel(&self) -> usize {
        self.max_parallel.unwrap_or(1).max(1)
    }
}
