//! The paired-read detector.
//!
//! Pipeline:
//! 1. Validate input (non-empty, unique ids)
//! 2. Filter to supported sequence formats
//! 3. Derive stem + mate role per dataset
//! 4. Group by (stem, pattern family)
//! 5. Validate groups: one forward + one reverse with matching trailing
//!    tags, else unpaired
//! 6. Score, name, and order the pairs

use std::time::Instant;

use galaksio_core::errors::DetectionError;
use galaksio_core::types::collections::SmallVec2;
use galaksio_core::types::{DatasetDescriptor, FxHashMap, FxHashSet};

use crate::confidence::{ConfidenceScorer, PairEvidence};
use crate::patterns::formats;
use crate::patterns::{match_mate, MateMatch, MateRole, PatternFamily};

use super::naming;
use super::types::{DetectionResult, PairedGroup, UnpairedDataset, UnpairedReason};

/// A supported dataset with its derived pairing key.
struct Candidate<'a> {
    index: usize,
    dataset: &'a DatasetDescriptor,
    /// Galaxy datatype, or the file extension when none was reported.
    effective_type: String,
    mate: Option<MateMatch<'a>>,
}

/// Candidates sharing one (stem, family) key, in input order.
struct GroupBucket {
    key: String,
    members: SmallVec2<usize>,
}

/// Detects paired-end mates in a flat list of datasets.
///
/// Detection is pure: identical input yields an identical result.
#[derive(Debug, Clone, Default)]
pub struct PairedReadDetector {
    scorer: ConfidenceScorer,
}

impl PairedReadDetector {
    pub fn new(scorer: ConfidenceScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &ConfidenceScorer {
        &self.scorer
    }

    /// Partition `datasets` into paired groups and unpaired entries.
    ///
    /// Unsupported formats are dropped and appear in neither list.
    pub fn detect(&self, datasets: &[DatasetDescriptor]) -> Result<DetectionResult, DetectionError> {
        let start = Instant::now();
        validate(datasets)?;

        let candidates: Vec<Candidate<'_>> = datasets
            .iter()
            .enumerate()
            .filter_map(|(index, dataset)| classify(index, dataset))
            .collect();

        let mut paired = Vec::new();
        // (input index, entry) so unpaired output can be restored to input order.
        let mut unpaired: Vec<(usize, UnpairedDataset)> = Vec::new();

        let mut buckets: Vec<GroupBucket> = Vec::new();
        let mut bucket_index: FxHashMap<(String, PatternFamily), usize> = FxHashMap::default();

        for (ci, candidate) in candidates.iter().enumerate() {
            let Some(mate) = candidate.mate else {
                unpaired.push((
                    candidate.index,
                    UnpairedDataset {
                        dataset: candidate.dataset.clone(),
                        reason: UnpairedReason::NoMateMarker,
                        group_id: None,
                    },
                ));
                continue;
            };

            let stem_key = mate.stem.to_lowercase();
            let family = mate.pattern.family;
            let slot = *bucket_index
                .entry((stem_key.clone(), family))
                .or_insert_with(|| {
                    buckets.push(GroupBucket {
                        key: format!("{family}:{stem_key}"),
                        members: SmallVec2::new(),
                    });
                    buckets.len() - 1
                });
            buckets[slot].members.push(ci);
        }

        for bucket in &buckets {
            match self.resolve_bucket(bucket, &candidates) {
                Ok(groups) => paired.extend(groups),
                Err(reason) => {
                    if matches!(reason, UnpairedReason::AmbiguousPair { .. }) {
                        tracing::debug!(group_id = %bucket.key, %reason, "ambiguous mate assignment");
                    }
                    for &ci in &bucket.members {
                        let c = &candidates[ci];
                        unpaired.push((
                            c.index,
                            UnpairedDataset {
                                dataset: c.dataset.clone(),
                                reason: reason.clone(),
                                group_id: Some(bucket.key.clone()),
                            },
                        ));
                    }
                }
            }
        }

        paired.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.suggested_name.cmp(&b.suggested_name))
                .then_with(|| a.group_id.cmp(&b.group_id))
        });
        unpaired.sort_by_key(|(index, _)| *index);

        let result = DetectionResult::new(paired, unpaired.into_iter().map(|(_, u)| u).collect());
        tracing::info!(
            dataset_count = datasets.len(),
            supported = candidates.len(),
            total_pairs = result.total_pairs,
            total_unpaired = result.total_unpaired,
            detection_time_us = start.elapsed().as_micros() as u64,
            "paired-read detection complete"
        );
        Ok(result)
    }

    /// Turn one bucket into its pairs, or the reason its members stay unpaired.
    ///
    /// Members are first split by trailing tag. If every tag forms exactly one
    /// forward and one reverse mate, each tag yields its own pair. Otherwise
    /// the bucket must hold a single forward and a single reverse mate whose
    /// tags agree.
    fn resolve_bucket(
        &self,
        bucket: &GroupBucket,
        candidates: &[Candidate<'_>],
    ) -> Result<Vec<PairedGroup>, UnpairedReason> {
        let mut by_tag: Vec<(Option<String>, TagSlot<'_, '_>)> = Vec::new();
        let mut forwards: SmallVec2<&Candidate<'_>> = SmallVec2::new();
        let mut reverses: SmallVec2<&Candidate<'_>> = SmallVec2::new();
        for &ci in &bucket.members {
            let c = &candidates[ci];
            let Some(mate) = c.mate else { continue };
            let tag = tag_key(&mate);
            let i = match by_tag.iter().position(|(t, _)| *t == tag) {
                Some(i) => i,
                None => {
                    by_tag.push((tag, TagSlot::default()));
                    by_tag.len() - 1
                }
            };
            let slot = &mut by_tag[i].1;
            match mate.role {
                MateRole::Forward => {
                    slot.forwards.push(c);
                    forwards.push(c);
                }
                MateRole::Reverse => {
                    slot.reverses.push(c);
                    reverses.push(c);
                }
            }
        }

        if by_tag.len() > 1 && by_tag.iter().all(|(_, slot)| slot.is_complete()) {
            return by_tag
                .iter()
                .map(|(tag, slot)| {
                    let group_id = match tag {
                        Some(tag) => format!("{}:{tag}", bucket.key),
                        None => bucket.key.clone(),
                    };
                    self.build_pair(group_id, slot.forwards[0], slot.reverses[0])
                })
                .collect();
        }

        if forwards.len() > 1 {
            return Err(UnpairedReason::AmbiguousPair {
                role: MateRole::Forward,
                candidates: forwards.len(),
            });
        }
        if reverses.len() > 1 {
            return Err(UnpairedReason::AmbiguousPair {
                role: MateRole::Reverse,
                candidates: reverses.len(),
            });
        }
        let (Some(&fwd), Some(&rev)) = (forwards.first(), reverses.first()) else {
            return Err(UnpairedReason::MissingMate);
        };
        let forward_tag = fwd.mate.as_ref().and_then(tag_key);
        if forward_tag != rev.mate.as_ref().and_then(tag_key) {
            let original = |c: &Candidate<'_>| c.mate.and_then(|m| m.trailing_tag).map(str::to_string);
            return Err(UnpairedReason::TagMismatch {
                forward_tag: original(fwd),
                reverse_tag: original(rev),
            });
        }

        let group_id = match forward_tag {
            Some(tag) => format!("{}:{tag}", bucket.key),
            None => bucket.key.clone(),
        };
        Ok(vec![self.build_pair(group_id, fwd, rev)?])
    }

    fn build_pair(
        &self,
        group_id: String,
        fwd: &Candidate<'_>,
        rev: &Candidate<'_>,
    ) -> Result<PairedGroup, UnpairedReason> {
        let (Some(fwd_mate), Some(rev_mate)) = (fwd.mate, rev.mate) else {
            return Err(UnpairedReason::MissingMate);
        };
        let evidence = PairEvidence::gather(
            fwd.dataset,
            rev.dataset,
            &fwd_mate,
            &rev_mate,
            &fwd.effective_type,
            &rev.effective_type,
        );
        // The weaker marker names the pair; ties go to the forward mate.
        let pattern = if rev_mate.pattern.strength < fwd_mate.pattern.strength {
            rev_mate.pattern
        } else {
            fwd_mate.pattern
        };
        let suggested_name = match fwd_mate.trailing_tag {
            Some(tag) => naming::suggested_name(&format!("{}_{tag}", fwd_mate.stem)),
            None => naming::suggested_name(fwd_mate.stem),
        };

        Ok(PairedGroup {
            group_id,
            forward: fwd.dataset.clone(),
            reverse: rev.dataset.clone(),
            pair_type: pattern.id.to_string(),
            family: pattern.family,
            confidence: self.scorer.score(&evidence),
            suggested_name,
            collection_created: false,
            collection_id: None,
        })
    }
}

/// Forward and reverse candidates sharing one trailing tag.
#[derive(Default)]
struct TagSlot<'c, 'a> {
    forwards: SmallVec2<&'c Candidate<'a>>,
    reverses: SmallVec2<&'c Candidate<'a>>,
}

impl TagSlot<'_, '_> {
    fn is_complete(&self) -> bool {
        self.forwards.len() == 1 && self.reverses.len() == 1
    }
}

/// Lowercased trailing tag; `None` for exact matches.
fn tag_key(mate: &MateMatch<'_>) -> Option<String> {
    mate.trailing_tag.map(str::to_lowercase)
}

/// Reject empty input and duplicate ids.
fn validate(datasets: &[DatasetDescriptor]) -> Result<(), DetectionError> {
    if datasets.is_empty() {
        return Err(DetectionError::EmptyInput);
    }
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for ds in datasets {
        if !seen.insert(ds.id.as_str()) {
            return Err(DetectionError::DuplicateId { id: ds.id.clone() });
        }
    }
    Ok(())
}

/// Classify one dataset, or `None` if its format is out of scope.
fn classify(index: usize, dataset: &DatasetDescriptor) -> Option<Candidate<'_>> {
    let format = formats::classify(&dataset.name, &dataset.data_type)?;
    let effective_type = if dataset.data_type.trim().is_empty() {
        format
            .extension
            .unwrap_or_default()
            .trim_start_matches('.')
            .to_ascii_lowercase()
    } else {
        dataset.data_type.trim().to_ascii_lowercase()
    };
    Some(Candidate {
        index,
        dataset,
        effective_type,
        mate: match_mate(format.stem),
    })
}
