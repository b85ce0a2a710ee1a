//! Auto-pair orchestration: one collection-creation call per confident group.
//!
//! A failed call is recorded against its group and never stops the others.
//! Cancellation is checked before every call; groups not yet attempted when
//! it fires are reported as skipped.

use galaksio_core::errors::GalaksioErrorCode;
use galaksio_core::traits::{Cancellable, GalaxyApi};
use galaksio_core::types::CreatedCollection;
use galaksio_pairing::confidence::DEFAULT_AUTO_PAIR_THRESHOLD;
use galaksio_pairing::{build_request, DetectionResult, PairedGroup};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// What happened to one eligible group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GroupOutcome {
    Created {
        group_id: String,
        collection: CreatedCollection,
    },
    Failed {
        group_id: String,
        error: String,
        error_code: String,
    },
    Skipped {
        group_id: String,
    },
}

impl GroupOutcome {
    pub fn group_id(&self) -> &str {
        match self {
            Self::Created { group_id, .. } | Self::Failed { group_id, .. } | Self::Skipped { group_id } => {
                group_id
            }
        }
    }
}

/// Aggregate result of one auto-pair run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoPairReport {
    pub collections_created: usize,
    /// Groups at or above the threshold, whether or not a call was made.
    pub high_confidence_pairs: usize,
    pub failures: usize,
    pub skipped: usize,
    pub cancelled: bool,
    /// One entry per attempted group, in group order.
    pub outcomes: Vec<GroupOutcome>,
}

impl AutoPairReport {
    /// Collections created in this run, in group order.
    pub fn created_collections(&self) -> Vec<CreatedCollection> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                GroupOutcome::Created { collection, .. } => Some(collection.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Creates collections for groups whose confidence clears a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoPairOrchestrator {
    threshold: f64,
    max_parallel: usize,
}

impl Default for AutoPairOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_PAIR_THRESHOLD, 1)
    }
}

impl AutoPairOrchestrator {
    /// `max_parallel` of 1 (or 0) runs serially.
    pub fn new(threshold: f64, max_parallel: usize) -> Self {
        Self {
            threshold,
            max_parallel: max_parallel.max(1),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn with_threshold(self, threshold: f64) -> Self {
        Self { threshold, ..self }
    }

    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Create one collection per eligible group of `result` and record each
    /// success on its group.
    ///
    /// Groups that already carry a collection are not resubmitted.
    pub fn run<A, C>(
        &self,
        api: &A,
        history_id: &str,
        result: &mut DetectionResult,
        cancel: &C,
    ) -> AutoPairReport
    where
        A: GalaxyApi + ?Sized,
        C: Cancellable + Sync + ?Sized,
    {
        let high_confidence_pairs = result.groups_above(self.threshold).count();
        let eligible: Vec<&PairedGroup> = result
            .groups_above(self.threshold)
            .filter(|g| !g.collection_created)
            .collect();

        let outcomes = if self.max_parallel > 1 && eligible.len() > 1 {
            self.run_parallel(api, history_id, &eligible, cancel)
        } else {
            eligible
                .iter()
                .map(|group| attempt(api, history_id, group, cancel))
                .collect()
        };

        let mut report = AutoPairReport {
            high_confidence_pairs,
            ..AutoPairReport::default()
        };
        for outcome in &outcomes {
            match outcome {
                GroupOutcome::Created {
                    group_id,
                    collection,
                } => {
                    if let Some(group) = result.group_mut(group_id) {
                        group.mark_collection_created(collection.collection_id.clone());
                    }
                    report.collections_created += 1;
                }
                GroupOutcome::Failed { .. } => report.failures += 1,
                GroupOutcome::Skipped { .. } => report.skipped += 1,
            }
        }
        report.cancelled = report.skipped > 0;
        report.outcomes = outcomes;

        tracing::info!(
            history_id,
            threshold = self.threshold,
            high_confidence_pairs = report.high_confidence_pairs,
            created = report.collections_created,
            failures = report.failures,
            skipped = report.skipped,
            "auto-pair run complete"
        );
        report
    }

    fn run_parallel<A, C>(
        &self,
        api: &A,
        history_id: &str,
        eligible: &[&PairedGroup],
        cancel: &C,
    ) -> Vec<GroupOutcome>
    where
        A: GalaxyApi + ?Sized,
        C: Cancellable + Sync + ?Sized,
    {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_parallel)
            .build()
        {
            Ok(pool) => pool.install(|| {
                eligible
                    .par_iter()
                    .map(|group| attempt(api, history_id, group, cancel))
                    .collect()
            }),
            Err(error) => {
                tracing::warn!(%error, "could not build worker pool, creating collections serially");
                eligible
                    .iter()
                    .map(|group| attempt(api, history_id, group, cancel))
                    .collect()
            }
        }
    }
}

fn attempt<A, C>(api: &A, history_id: &str, group: &PairedGroup, cancel: &C) -> GroupOutcome
where
    A: GalaxyApi + ?Sized,
    C: Cancellable + ?Sized,
{
    let group_id = group.group_id.clone();
    if cancel.is_cancelled() {
        return GroupOutcome::Skipped { group_id };
    }
    match api.create_paired_collection(history_id, &build_request(group)) {
        Ok(collection) => {
            tracing::debug!(
                group_id = %group_id,
                collection_id = %collection.collection_id,
                "created paired collection"
            );
            GroupOutcome::Created {
                group_id,
                collection,
            }
        }
        Err(error) => {
            tracing::warn!(group_id = %group_id, %error, "collection creation failed");
            GroupOutcome::Failed {
                group_id,
                error_code: error.error_code().to_string(),
                error: error.to_string(),
            }
        }
    }
}
