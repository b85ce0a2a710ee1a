//! In-memory Galaxy used by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use galaksio_core::errors::GalaxyError;
use galaksio_core::traits::{Cancellable, CancellationToken, GalaxyApi, GalaxyVersion};
use galaksio_core::types::{CollectionRequest, CreatedCollection, DatasetDescriptor};

#[derive(Default)]
pub struct FakeGalaxy {
    pub datasets: Vec<DatasetDescriptor>,
    /// Errors returned by the next history fetches, before succeeding.
    pub fetch_errors: Mutex<VecDeque<GalaxyError>>,
    /// 1-based collection-creation calls that fail.
    pub failing_calls: Vec<usize>,
    /// Cancelled during the given 1-based creation call.
    pub cancel_during: Option<(usize, CancellationToken)>,
    pub fetches: AtomicUsize,
    pub creates: AtomicUsize,
    pub requests: Mutex<Vec<CollectionRequest>>,
}

impl FakeGalaxy {
    pub fn with_datasets(datasets: Vec<DatasetDescriptor>) -> Self {
        galaksio_core::tracing::init_tracing();
        Self {
            datasets,
            ..Self::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn requested_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.name.clone())
            .collect();
        names.sort();
        names
    }
}

impl GalaxyApi for FakeGalaxy {
    fn history_contents(&self, _history_id: &str) -> Result<Vec<DatasetDescriptor>, GalaxyError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fetch_errors.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(self.datasets.clone())
    }

    fn create_paired_collection(
        &self,
        _history_id: &str,
        request: &CollectionRequest,
    ) -> Result<CreatedCollection, GalaxyError> {
        let call = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request.clone());
        if let Some((n, token)) = &self.cancel_during {
            if *n == call {
                token.cancel();
            }
        }
        if self.failing_calls.contains(&call) {
            return Err(GalaxyError::Http {
                status: 500,
                body: "internal error".into(),
            });
        }
        Ok(CreatedCollection {
            collection_id: format!("hdca_{call}"),
            collection_name: request.name.clone(),
        })
    }

    fn version(&self) -> Result<GalaxyVersion, GalaxyError> {
        Ok(GalaxyVersion {
            version_major: "25.0".into(),
            version_minor: "1".into(),
        })
    }
}

pub fn ds(id: &str, name: &str, size: u64) -> DatasetDescriptor {
    DatasetDescriptor::new(id, name, size, "fastqsanger", "hist1")
}

/// `n` high-confidence pairs named `s0`, `s1`, ... plus one single-end file.
pub fn history_with_pairs(n: usize) -> Vec<DatasetDescriptor> {
    let mut out = Vec::new();
    for i in 0..n {
        out.push(ds(&format!("f{i}"), &format!("s{i}_R1.fastq"), 1000));
        out.push(ds(&format!("r{i}"), &format!("s{i}_R2.fastq"), 1000));
    }
    out.push(ds("single", "ctrl.fastq", 500));
    out
}
