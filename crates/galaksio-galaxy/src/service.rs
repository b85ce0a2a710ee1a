//! PairingService: the four paired-read operations over one Galaxy server.
//!
//! Composes a [`GalaxyApi`], the detector, the orchestrator, a retry policy
//! for history fetches, and a per-history TTL cache of detection results.

use std::sync::Arc;
use std::time::Duration;

use galaksio_core::config::GalaksioConfig;
use galaksio_core::errors::ConfigError;
use galaksio_core::traits::{Cancellable, CancellationToken, GalaxyApi};
use galaksio_core::types::CreatedCollection;
use galaksio_pairing::confidence::ConfidenceSummary;
use galaksio_pairing::{
    build_request, supported_patterns, DetectionResult, PairedGroup, PairedReadDetector,
    PatternCatalog, UnpairedDataset,
};
use moka::sync::Cache;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::orchestrator::{AutoPairOrchestrator, GroupOutcome};
use crate::transport::RetryPolicy;

/// Counts reported by an auto-pair run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoPairCounts {
    pub total_pairs: usize,
    pub high_confidence_pairs: usize,
    pub collections_created: usize,
    pub unpaired_count: usize,
    pub failures: usize,
    pub skipped: usize,
}

/// Result of [`PairingService::auto_pair_all_reads`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoPairSummary {
    /// All detected groups; created ones carry their collection id.
    pub paired_groups: Vec<PairedGroup>,
    pub unpaired: Vec<UnpairedDataset>,
    pub created_collections: Vec<CreatedCollection>,
    pub summary: AutoPairCounts,
    pub confidence: ConfidenceSummary,
    /// Per-group outcomes; empty when collection creation was not requested.
    pub outcomes: Vec<GroupOutcome>,
    pub cancelled: bool,
}

/// Paired-read operations for the histories of one Galaxy server.
pub struct PairingService<A: GalaxyApi> {
    api: A,
    detector: PairedReadDetector,
    orchestrator: AutoPairOrchestrator,
    retry: RetryPolicy,
    cache: Option<Cache<String, Arc<DetectionResult>>>,
}

impl<A: GalaxyApi> PairingService<A> {
    pub fn new(api: A, config: &GalaksioConfig) -> Self {
        let cache = config.cache.effective_enabled().then(|| {
            Cache::builder()
                .max_capacity(config.cache.effective_max_entries())
                .time_to_live(Duration::from_secs(config.cache.effective_ttl_secs()))
                .build()
        });
        Self {
            api,
            detector: PairedReadDetector::default(),
            orchestrator: AutoPairOrchestrator::new(
                config.pairing.effective_confidence_threshold(),
                config.pairing.effective_max_parallel(),
            ),
            retry: RetryPolicy::from_config(&config.retry),
            cache,
        }
    }

    /// Replace the retry policy used around history fetches.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn orchestrator(&self) -> &AutoPairOrchestrator {
        &self.orchestrator
    }

    /// Detect paired reads in a history. Served from the cache when a
    /// result for `history_id` is still live.
    pub fn detect_paired_reads(&self, history_id: &str) -> Result<DetectionResult, ServiceError> {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(history_id)) {
            tracing::debug!(history_id, "detection cache hit");
            return Ok(DetectionResult::clone(&hit));
        }

        let datasets = self
            .retry
            .run_galaxy(|_| self.api.history_contents(history_id))?;
        let result = self.detector.detect(&datasets)?;

        if let Some(cache) = &self.cache {
            cache.insert(history_id.to_string(), Arc::new(result.clone()));
        }
        Ok(result)
    }

    /// Create the paired collection for one detected group.
    ///
    /// Fails with `CollectionExists` if the group already records a
    /// collection. On success the group is marked with the new collection
    /// id and any cached detection for the history is dropped.
    pub fn create_paired_collection(
        &self,
        history_id: &str,
        group: &mut PairedGroup,
    ) -> Result<CreatedCollection, ServiceError> {
        if group.collection_created {
            return Err(ServiceError::CollectionExists {
                group_id: group.group_id.clone(),
            });
        }
        let created = self
            .api
            .create_paired_collection(history_id, &build_request(group))?;
        group.mark_collection_created(created.collection_id.clone());
        self.invalidate(history_id);
        tracing::info!(
            history_id,
            group_id = %group.group_id,
            collection_id = %created.collection_id,
            "created paired collection"
        );
        Ok(created)
    }

    /// Detect pairs and, if `create_collections`, create a collection for every
    /// group at or above `threshold` (the configured threshold when `None`).
    pub fn auto_pair_all_reads(
        &self,
        history_id: &str,
        create_collections: bool,
        threshold: Option<f64>,
    ) -> Result<AutoPairSummary, ServiceError> {
        self.auto_pair_all_reads_with_cancel(
            history_id,
            create_collections,
            threshold,
            &CancellationToken::new(),
        )
    }

    /// [`auto_pair_all_reads`](Self::auto_pair_all_reads) with a cancellation
    /// token polled before every collection-creation call.
    pub fn auto_pair_all_reads_with_cancel<C: Cancellable + Sync + ?Sized>(
        &self,
        history_id: &str,
        create_collections: bool,
        threshold: Option<f64>,
        cancel: &C,
    ) -> Result<AutoPairSummary, ServiceError> {
        let orchestrator = match threshold {
            Some(t) if !(0.0..=1.0).contains(&t) => {
                return Err(ConfigError::ValidationFailed {
                    field: "pairing.confidence_threshold".to_string(),
                    message: format!("must be between 0.0 and 1.0, got {t}"),
                }
                .into())
            }
            Some(t) => self.orchestrator.with_threshold(t),
            None => self.orchestrator,
        };
        if cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }

        let mut result = self.detect_paired_reads(history_id)?;

        let report = if create_collections {
            let report = orchestrator.run(&self.api, history_id, &mut result, cancel);
            if report.collections_created > 0 {
                self.invalidate(history_id);
            }
            report
        } else {
            Default::default()
        };

        let summary = AutoPairCounts {
            total_pairs: result.total_pairs,
            high_confidence_pairs: result.groups_above(orchestrator.threshold()).count(),
            collections_created: report.collections_created,
            unpaired_count: result.total_unpaired,
            failures: report.failures,
            skipped: report.skipped,
        };
        Ok(AutoPairSummary {
            created_collections: report.created_collections(),
            paired_groups: result.paired_groups,
            unpaired: result.unpaired,
            summary,
            confidence: result.summary,
            outcomes: report.outcomes,
            cancelled: report.cancelled,
        })
    }

    /// The naming patterns and extensions the detector recognizes.
    pub fn supported_patterns(&self) -> PatternCatalog {
        supported_patterns()
    }

    /// Drop any cached detection for `history_id`.
    pub fn invalidate(&self, history_id: &str) {
        if let Some(cache) = &self.cache {
            cache.invalidate(history_id);
        }
    }
}
