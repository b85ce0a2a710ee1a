//! Weighted-sum confidence scorer.
//!
//! score = w_pattern * pattern_strength
//!       + w_size    * size_ratio
//!       + w_type    * [data types match]
//!
//! clamped to [0, 1]. Each term is non-decreasing in its input, so the score
//! is monotonic in every factor.

use galaksio_core::types::DatasetDescriptor;

use crate::patterns::MateMatch;

/// Loose (trailing-tag) marker matches keep this fraction of their strength.
pub const LOOSE_MATCH_PENALTY: f64 = 0.6;

/// Relative weight of each evidence factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceWeights {
    pub pattern: f64,
    pub size: f64,
    pub data_type: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            pattern: 0.45,
            size: 0.35,
            data_type: 0.20,
        }
    }
}

/// Evidence that two datasets are mates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairEvidence {
    /// Marker specificity in [0, 1].
    pub pattern_strength: f64,
    /// min(size) / max(size), 0 when either size is unknown.
    pub size_ratio: f64,
    pub types_match: bool,
}

impl PairEvidence {
    /// Gather evidence from two mates and the markers that matched them.
    ///
    /// `forward_type`/`reverse_type` are the effective data types (Galaxy
    /// datatype, or the file extension when Galaxy reported none).
    pub fn gather(
        forward: &DatasetDescriptor,
        reverse: &DatasetDescriptor,
        forward_mate: &MateMatch<'_>,
        reverse_mate: &MateMatch<'_>,
        forward_type: &str,
        reverse_type: &str,
    ) -> Self {
        Self {
            pattern_strength: marker_strength(forward_mate).min(marker_strength(reverse_mate)),
            size_ratio: size_ratio(forward.size_bytes, reverse.size_bytes),
            types_match: forward_type.eq_ignore_ascii_case(reverse_type),
        }
    }
}

/// Strength of one matched marker, penalized for loose matches.
pub fn marker_strength(mate: &MateMatch<'_>) -> f64 {
    if mate.is_loose() {
        mate.pattern.strength * LOOSE_MATCH_PENALTY
    } else {
        mate.pattern.strength
    }
}

/// Size similarity in [0, 1]; 0 when either size is unknown.
pub fn size_ratio(a: u64, b: u64) -> f64 {
    if a == 0 || b == 0 {
        return 0.0;
    }
    a.min(b) as f64 / a.max(b) as f64
}

/// Scores candidate pairs. A pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceScorer {
    weights: ConfidenceWeights,
}

impl ConfidenceScorer {
    pub fn new(weights: ConfidenceWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ConfidenceWeights {
        &self.weights
    }

    /// Compute the confidence score for a pair.
    pub fn score(&self, evidence: &PairEvidence) -> f64 {
        let w = &self.weights;
        let type_term = if evidence.types_match { 1.0 } else { 0.0 };
        let raw = w.pattern * evidence.pattern_strength.clamp(0.0, 1.0)
            + w.size * evidence.size_ratio.clamp(0.0, 1.0)
            + w.data_type * type_term;
        if raw.is_nan() {
            return 0.0;
        }
        raw.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(pattern_strength: f64, size_ratio: f64, types_match: bool) -> PairEvidence {
        PairEvidence {
            pattern_strength,
            size_ratio,
            types_match,
        }
    }

    #[test]
    fn perfect_pair_scores_one() {
        let scorer = ConfidenceScorer::default();
        let s = scorer.score(&evidence(1.0, 1.0, true));
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn nothing_scores_zero() {
        let scorer = ConfidenceScorer::default();
        assert_eq!(scorer.score(&evidence(0.0, 0.0, false)), 0.0);
    }

    #[test]
    fn closer_sizes_score_higher() {
        let scorer = ConfidenceScorer::default();
        let near = scorer.score(&evidence(1.0, 0.98, true));
        let far = scorer.score(&evidence(1.0, 0.25, true));
        assert!(near > far);
    }

    #[test]
    fn type_mismatch_lowers_score() {
        let scorer = ConfidenceScorer::default();
        assert!(scorer.score(&evidence(1.0, 1.0, true)) > scorer.score(&evidence(1.0, 1.0, false)));
    }

    #[test]
    fn oversized_weights_are_clamped() {
        let scorer = ConfidenceScorer::new(ConfidenceWeights {
            pattern: 1.0,
            size: 1.0,
            data_type: 1.0,
        });
        assert_eq!(scorer.score(&evidence(1.0, 1.0, true)), 1.0);
    }

    #[test]
    fn size_ratio_handles_unknown_sizes() {
        assert_eq!(size_ratio(0, 100), 0.0);
        assert_eq!(size_ratio(100, 0), 0.0);
        assert_eq!(size_ratio(50, 100), 0.5);
        assert_eq!(size_ratio(100, 50), 0.5);
    }
}
