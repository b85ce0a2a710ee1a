//! PairingService operations against an in-memory Galaxy.

mod common;

use std::time::Duration;

use common::{ds, history_with_pairs, FakeGalaxy};
use galaksio_core::config::GalaksioConfig;
use galaksio_core::errors::{DetectionError, GalaksioErrorCode, GalaxyError};
use galaksio_core::traits::{Cancellable, CancellationToken};
use galaksio_galaxy::{ApiResponse, PairingService, RetryPolicy, ServiceError};

fn config() -> GalaksioConfig {
    let mut config = GalaksioConfig::default();
    config.retry.base_delay_ms = Some(0);
    config.retry.max_delay_ms = Some(0);
    config
}

fn exp_ctrl() -> FakeGalaxy {
    FakeGalaxy::with_datasets(vec![
        ds("1", "exp_R1.fastq", 1000),
        ds("2", "exp_R2.fastq", 1020),
        ds("3", "ctrl.fastq", 500),
    ])
}

// ---- detect_paired_reads ----

#[test]
fn detect_end_to_end() {
    let service = PairingService::new(exp_ctrl(), &config());
    let result = service.detect_paired_reads("hist1").unwrap();
    assert_eq!(result.total_pairs, 1);
    assert_eq!(result.total_unpaired, 1);
    assert!(result.paired_groups[0].confidence >= 0.8);
    assert_eq!(result.unpaired[0].dataset.id, "3");
}

#[test]
fn cached_result_served_until_invalidated() {
    let service = PairingService::new(exp_ctrl(), &config());

    let first = service.detect_paired_reads("hist1").unwrap();
    let second = service.detect_paired_reads("hist1").unwrap();
    assert_eq!(first, second);
    assert_eq!(service.api().fetch_count(), 1);

    service.invalidate("hist1");
    service.detect_paired_reads("hist1").unwrap();
    assert_eq!(service.api().fetch_count(), 2);
}

#[test]
fn cache_is_per_history() {
    let service = PairingService::new(exp_ctrl(), &config());
    service.detect_paired_reads("hist1").unwrap();
    service.detect_paired_reads("hist2").unwrap();
    assert_eq!(service.api().fetch_count(), 2);
}

#[test]
fn disabled_cache_always_fetches() {
    let mut cfg = config();
    cfg.cache.enabled = Some(false);
    let service = PairingService::new(exp_ctrl(), &cfg);
    service.detect_paired_reads("hist1").unwrap();
    service.detect_paired_reads("hist1").unwrap();
    assert_eq!(service.api().fetch_count(), 2);
}

#[test]
fn transient_fetch_failure_is_retried() {
    let galaxy = exp_ctrl();
    galaxy.fetch_errors.lock().unwrap().push_back(GalaxyError::Http {
        status: 503,
        body: "busy".into(),
    });
    let service = PairingService::new(galaxy, &config());

    let result = service.detect_paired_reads("hist1").unwrap();
    assert_eq!(result.total_pairs, 1);
    assert_eq!(service.api().fetch_count(), 2);
}

#[test]
fn retry_budget_is_respected() {
    let galaxy = exp_ctrl();
    for _ in 0..5 {
        galaxy.fetch_errors.lock().unwrap().push_back(GalaxyError::Network {
            reason: "connection reset".into(),
        });
    }
    let service = PairingService::new(galaxy, &config())
        .with_retry(RetryPolicy::new(3, Duration::ZERO, Duration::ZERO));

    let err = service.detect_paired_reads("hist1").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Galaxy(GalaxyError::RetriesExhausted { attempts: 3, .. })
    ));
    assert_eq!(err.error_code(), "GALAXY_UNAVAILABLE");
    assert_eq!(service.api().fetch_count(), 3);
}

#[test]
fn client_errors_are_not_retried() {
    let galaxy = exp_ctrl();
    galaxy.fetch_errors.lock().unwrap().push_back(GalaxyError::Http {
        status: 404,
        body: "no such history".into(),
    });
    let service = PairingService::new(galaxy, &config());

    let err = service.detect_paired_reads("missing").unwrap_err();
    assert!(matches!(err, ServiceError::Galaxy(GalaxyError::Http { status: 404, .. })));
    assert_eq!(service.api().fetch_count(), 1);
}

#[test]
fn empty_history_is_invalid_input() {
    let service = PairingService::new(FakeGalaxy::default(), &config());
    let err = service.detect_paired_reads("hist1").unwrap_err();
    assert!(matches!(err, ServiceError::Detection(DetectionError::EmptyInput)));
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

// ---- create_paired_collection ----

#[test]
fn creating_a_collection_invalidates_the_cache() {
    let service = PairingService::new(exp_ctrl(), &config());
    let mut result = service.detect_paired_reads("hist1").unwrap();

    let created = service
        .create_paired_collection("hist1", &mut result.paired_groups[0])
        .unwrap();
    assert_eq!(created.collection_name, "exp_paired");

    service.detect_paired_reads("hist1").unwrap();
    assert_eq!(service.api().fetch_count(), 2);
}

#[test]
fn creating_a_collection_marks_the_group() {
    let service = PairingService::new(exp_ctrl(), &config());
    let mut result = service.detect_paired_reads("hist1").unwrap();
    let group = &mut result.paired_groups[0];

    let created = service.create_paired_collection("hist1", group).unwrap();
    assert!(group.collection_created);
    assert_eq!(group.collection_id.as_deref(), Some(created.collection_id.as_str()));
}

#[test]
fn second_create_for_same_group_is_rejected() {
    let service = PairingService::new(exp_ctrl(), &config());
    let mut result = service.detect_paired_reads("hist1").unwrap();
    let group = &mut result.paired_groups[0];

    service.create_paired_collection("hist1", group).unwrap();
    let err = service.create_paired_collection("hist1", group).unwrap_err();
    assert!(matches!(err, ServiceError::CollectionExists { ref group_id } if group_id == "illumina:exp"));
    assert_eq!(err.error_code(), "COLLECTION_EXISTS");
    assert_eq!(service.api().create_count(), 1);
}

#[test]
fn failed_create_leaves_group_unmarked() {
    let api = FakeGalaxy {
        failing_calls: vec![1],
        ..exp_ctrl()
    };
    let service = PairingService::new(api, &config());
    let mut result = service.detect_paired_reads("hist1").unwrap();
    let group = &mut result.paired_groups[0];

    assert!(service.create_paired_collection("hist1", group).is_err());
    assert!(!group.collection_created);
    assert!(group.collection_id.is_none());
}

// ---- auto_pair_all_reads ----

#[test]
fn auto_pair_creates_confident_collections() {
    let service = PairingService::new(exp_ctrl(), &config());
    let summary = service.auto_pair_all_reads("hist1", true, None).unwrap();

    assert_eq!(summary.summary.total_pairs, 1);
    assert_eq!(summary.summary.high_confidence_pairs, 1);
    assert_eq!(summary.summary.collections_created, 1);
    assert_eq!(summary.summary.unpaired_count, 1);
    assert_eq!(summary.created_collections.len(), 1);
    assert!(summary.paired_groups[0].collection_created);
    assert_eq!(summary.paired_groups[0].collection_id.as_deref(), Some("hdca_1"));
    assert!(!summary.cancelled);
}

#[test]
fn auto_pair_without_creation_only_detects() {
    let service = PairingService::new(exp_ctrl(), &config());
    let summary = service.auto_pair_all_reads("hist1", false, None).unwrap();
    assert_eq!(summary.summary.total_pairs, 1);
    assert_eq!(summary.summary.collections_created, 0);
    assert!(summary.outcomes.is_empty());
    assert_eq!(service.api().create_count(), 0);
}

#[test]
fn auto_pair_threshold_override() {
    let galaxy = FakeGalaxy::with_datasets(vec![ds("1", "w_R1.fastq", 0), ds("2", "w_R2.fastq", 0)]);
    let service = PairingService::new(galaxy, &config());

    let strict = service.auto_pair_all_reads("hist1", true, Some(0.9)).unwrap();
    assert_eq!(strict.summary.collections_created, 0);

    let loose = service.auto_pair_all_reads("hist1", true, Some(0.5)).unwrap();
    assert_eq!(loose.summary.collections_created, 1);
}

#[test]
fn auto_pair_rejects_out_of_range_threshold() {
    let service = PairingService::new(exp_ctrl(), &config());
    let err = service.auto_pair_all_reads("hist1", true, Some(1.5)).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
    assert_eq!(service.api().fetch_count(), 0);
}

#[test]
fn auto_pair_reports_partial_failure() {
    let galaxy = FakeGalaxy {
        failing_calls: vec![2],
        ..FakeGalaxy::with_datasets(history_with_pairs(3))
    };
    let service = PairingService::new(galaxy, &config());
    let summary = service.auto_pair_all_reads("hist1", true, None).unwrap();

    assert_eq!(summary.summary.collections_created, 2);
    assert_eq!(summary.summary.failures, 1);
    assert_eq!(summary.created_collections.len(), 2);
    assert!(!summary.paired_groups[1].collection_created);
}

#[test]
fn auto_pair_cancelled_before_start() {
    let service = PairingService::new(exp_ctrl(), &config());
    let token = CancellationToken::new();
    token.cancel();
    let err = service
        .auto_pair_all_reads_with_cancel("hist1", true, None, &token)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Cancelled));
    assert_eq!(err.error_code(), "CANCELLED");
}

#[test]
fn auto_pair_summary_envelope() {
    let service = PairingService::new(exp_ctrl(), &config());
    let response = ApiResponse::from(service.auto_pair_all_reads("hist1", true, None));
    let v = serde_json::to_value(&response).unwrap();
    assert_eq!(v["success"], true);
    assert_eq!(v["data"]["summary"]["collections_created"], 1);
    assert_eq!(v["data"]["paired_groups"][0]["suggested_name"], "exp_paired");
}

// ---- supported_patterns ----

#[test]
fn supported_patterns_reflect_the_detector() {
    let service = PairingService::new(FakeGalaxy::default(), &config());
    let catalog = service.supported_patterns();
    assert_eq!(catalog.patterns[0].id, "illumina_r1_r2_001");
    assert!(catalog.patterns.iter().any(|p| p.id == "numeric_1_2"));
    assert_eq!(catalog.supported_extensions.len(), 12);
}
