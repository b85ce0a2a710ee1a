//! Detection output types.

use std::fmt;

use galaksio_core::types::DatasetDescriptor;
use serde::{Deserialize, Serialize};

use crate::confidence::{ConfidenceBucket, ConfidenceSummary};
use crate::patterns::{MateRole, PatternFamily};

/// Two datasets identified as mates of one paired-end sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedGroup {
    /// `family:stem`, or `family:stem:tag` for mates sharing a trailing tag.
    /// Unique within one detection result.
    pub group_id: String,
    pub forward: DatasetDescriptor,
    pub reverse: DatasetDescriptor,
    /// Id of the naming pattern that matched.
    pub pair_type: String,
    pub family: PatternFamily,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub suggested_name: String,
    #[serde(default)]
    pub collection_created: bool,
    #[serde(default)]
    pub collection_id: Option<String>,
}

impl PairedGroup {
    pub fn confidence_bucket(&self) -> ConfidenceBucket {
        ConfidenceBucket::from_score(self.confidence)
    }

    /// Dataset ids of both mates, forward first.
    pub fn dataset_ids(&self) -> [&str; 2] {
        [&self.forward.id, &self.reverse.id]
    }

    /// Record that a collection now exists for this group.
    ///
    /// This is the only mutation a group ever sees. Returns `false` and
    /// leaves the group untouched if a collection was already recorded.
    pub fn mark_collection_created(&mut self, collection_id: impl Into<String>) -> bool {
        if self.collection_created {
            return false;
        }
        self.collection_created = true;
        self.collection_id = Some(collection_id.into());
        true
    }
}

/// Why a supported dataset was left unpaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum UnpairedReason {
    /// The name carries no known mate marker (single-end data).
    NoMateMarker,
    /// A marker matched but no mate with the same stem exists.
    MissingMate,
    /// More than one candidate claims the same mate role; nothing is guessed.
    AmbiguousPair { role: MateRole, candidates: usize },
    /// One forward and one reverse mate whose trailing tags differ.
    TagMismatch {
        forward_tag: Option<String>,
        reverse_tag: Option<String>,
    },
}

impl UnpairedReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoMateMarker => "no_mate_marker",
            Self::MissingMate => "missing_mate",
            Self::AmbiguousPair { .. } => "ambiguous_pair",
            Self::TagMismatch { .. } => "tag_mismatch",
        }
    }
}

impl fmt::Display for UnpairedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMateMarker => f.write_str("no paired-end marker in name"),
            Self::MissingMate => f.write_str("mate not found"),
            Self::AmbiguousPair { role, candidates } => write!(
                f,
                "ambiguous: {candidates} candidates for the {role} mate, low confidence"
            ),
            Self::TagMismatch {
                forward_tag,
                reverse_tag,
            } => write!(
                f,
                "mates carry different tags: '{}' and '{}'",
                forward_tag.as_deref().unwrap_or(""),
                reverse_tag.as_deref().unwrap_or("")
            ),
        }
    }
}

/// A supported dataset carried through unpaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnpairedDataset {
    pub dataset: DatasetDescriptor,
    pub reason: UnpairedReason,
    /// Pairing group the dataset fell into, when a marker matched.
    #[serde(default)]
    pub group_id: Option<String>,
}

/// Complete output of one detection call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Ordered by descending confidence, then suggested name.
    pub paired_groups: Vec<PairedGroup>,
    /// In input order.
    pub unpaired: Vec<UnpairedDataset>,
    pub total_pairs: usize,
    pub total_unpaired: usize,
    pub summary: ConfidenceSummary,
}

impl DetectionResult {
    pub fn new(paired_groups: Vec<PairedGroup>, unpaired: Vec<UnpairedDataset>) -> Self {
        let mut summary = ConfidenceSummary::default();
        for group in &paired_groups {
            summary.record(group.confidence_bucket());
        }
        Self {
            total_pairs: paired_groups.len(),
            total_unpaired: unpaired.len(),
            paired_groups,
            unpaired,
            summary,
        }
    }

    /// Groups at or above `threshold`, in result order.
    pub fn groups_above(&self, threshold: f64) -> impl Iterator<Item = &PairedGroup> {
        self.paired_groups
            .iter()
            .filter(move |g| g.confidence >= threshold)
    }

    pub fn group(&self, group_id: &str) -> Option<&PairedGroup> {
        self.paired_groups.iter().find(|g| g.group_id == group_id)
    }

    pub fn group_mut(&mut self, group_id: &str) -> Option<&mut PairedGroup> {
        self.paired_groups.iter_mut().find(|g| g.group_id == group_id)
    }

    /// Number of unpaired entries flagged as ambiguous.
    pub fn ambiguous_count(&self) -> usize {
        self.unpaired
            .iter()
            .filter(|u| matches!(u.reason, UnpairedReason::AmbiguousPair { .. }))
            .count()
    }
}
