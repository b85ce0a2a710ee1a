//! Confidence scoring for candidate mate pairs.

pub mod scorer;
pub mod types;

pub use scorer::{ConfidenceScorer, ConfidenceWeights, PairEvidence};
pub use types::{ConfidenceBucket, ConfidenceSummary, DEFAULT_AUTO_PAIR_THRESHOLD};
