//! Confidence buckets and per-result summary counts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound of the `High` bucket.
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// Lower bound of the `Medium` bucket.
pub const MEDIUM_CONFIDENCE: f64 = 0.6;

/// Default threshold for automatic collection creation.
pub const DEFAULT_AUTO_PAIR_THRESHOLD: f64 = 0.7;

/// Coarse confidence classes shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBucket {
    /// confidence ≥ 0.8
    High,
    /// confidence ≥ 0.6
    Medium,
    /// confidence < 0.6
    Low,
}

impl ConfidenceBucket {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_CONFIDENCE {
            Self::High
        } else if score >= MEDIUM_CONFIDENCE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of paired groups per confidence bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ConfidenceSummary {
    pub fn record(&mut self, bucket: ConfidenceBucket) {
        match bucket {
            ConfidenceBucket::High => self.high += 1,
            ConfidenceBucket::Medium => self.medium += 1,
            ConfidenceBucket::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}
