//! Blocking Galaxy HTTP client with retry, backoff, timeout, and gzip.

use std::sync::OnceLock;
use std::time::Duration;

use galaksio_core::config::GalaksioConfig;
use galaksio_core::errors::GalaxyError;
use galaksio_core::traits::{GalaxyApi, GalaxyVersion};
use galaksio_core::types::{CollectionRequest, CreatedCollection, DatasetDescriptor};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::protocol::{self, CollectionResponse, HistoryContentItem, ModernCollectionBody};
use super::retry::RetryPolicy;

/// Header carrying the Galaxy API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Error bodies longer than this are cut before they land in an error.
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the Galaxy transport.
#[derive(Debug, Clone)]
pub struct GalaxyClientConfig {
    /// Server root without a trailing slash.
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl GalaxyClientConfig {
    pub fn from_config(config: &GalaksioConfig) -> Self {
        Self {
            base_url: config.galaxy.effective_server(),
            api_key: config.galaxy.api_key.clone(),
            timeout: Duration::from_secs(config.galaxy.effective_timeout_secs()),
            retry: RetryPolicy::from_config(&config.retry),
        }
    }
}

fn net_err(e: reqwest::Error) -> GalaxyError {
    GalaxyError::Network {
        reason: e.to_string(),
    }
}

/// Collection creation is only repeated when Galaxy explicitly refused the
/// request; a timed-out POST may already have created the collection.
fn is_refused(e: &GalaxyError) -> bool {
    matches!(e, GalaxyError::Http { status: 429 | 503, .. })
}

/// [`GalaxyApi`] over Galaxy's REST API.
#[derive(Debug)]
pub struct GalaxyClient {
    config: GalaxyClientConfig,
    http: Client,
    version: OnceLock<GalaxyVersion>,
}

impl GalaxyClient {
    pub fn new(config: GalaxyClientConfig) -> Result<Self, GalaxyError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(net_err)?;
        Ok(Self {
            config,
            http,
            version: OnceLock::new(),
        })
    }

    pub fn from_config(config: &GalaksioConfig) -> Result<Self, GalaxyError> {
        Self::new(GalaxyClientConfig::from_config(config))
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, format!("{}{}", self.config.base_url, path));
        if let Some(key) = &self.config.api_key {
            req = req.header(API_KEY_HEADER, key);
        }
        req
    }

    /// One request, no retries.
    fn send<T: DeserializeOwned>(&self, path: &str, req: RequestBuilder) -> Result<T, GalaxyError> {
        let resp = req.send().map_err(net_err)?;
        let status = resp.status();
        let body = resp.text().map_err(net_err)?;
        if !status.is_success() {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(GalaxyError::Http {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|source| GalaxyError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, GalaxyError> {
        self.config
            .retry
            .run_galaxy(|_| self.send(path, self.request(Method::GET, path).query(query)))
    }

    fn post_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, GalaxyError> {
        self.config
            .retry
            .run(|_| self.send(path, self.request(Method::POST, path).json(body)), is_refused)
            .map_err(GalaxyError::from)
    }

    /// Server version, read once per client with a single attempt. A failed
    /// read is remembered as a modern server.
    pub fn server_version(&self) -> GalaxyVersion {
        self.version
            .get_or_init(|| {
                let path = "/api/version";
                match self.send(path, self.request(Method::GET, path)) {
                    Ok(version) => version,
                    Err(error) => {
                        tracing::warn!(%error, "could not read Galaxy version, assuming 25.0+");
                        GalaxyVersion::default()
                    }
                }
            })
            .clone()
    }
}

impl GalaxyApi for GalaxyClient {
    fn history_contents(&self, history_id: &str) -> Result<Vec<DatasetDescriptor>, GalaxyError> {
        let path = format!("/api/histories/{history_id}/contents");
        let items: Vec<HistoryContentItem> =
            self.get_json(&path, &[("v", "dev"), ("keys", protocol::CONTENTS_KEYS)])?;
        let listed = items.len();
        let datasets = protocol::live_datasets(items, history_id);
        tracing::debug!(history_id, listed, live = datasets.len(), "fetched history contents");
        Ok(datasets)
    }

    fn create_paired_collection(
        &self,
        history_id: &str,
        request: &CollectionRequest,
    ) -> Result<CreatedCollection, GalaxyError> {
        let path = format!("/api/histories/{history_id}/contents");
        let created: CollectionResponse = if self.server_version().supports_modern_collections() {
            match self.post_json(&path, &ModernCollectionBody::new(request)) {
                Err(error) if error.is_client_rejection() => {
                    tracing::warn!(history_id, %error, "modern collection payload rejected, retrying legacy shape");
                    self.post_json(&path, &request.to_legacy())?
                }
                other => other?,
            }
        } else {
            self.post_json(&path, &request.to_legacy())?
        };
        if created.id.trim().is_empty() {
            return Err(GalaxyError::InvalidResponse(
                "collection response carries no id".to_string(),
            ));
        }
        Ok(CreatedCollection {
            collection_id: created.id,
            collection_name: created.name.unwrap_or_else(|| request.name.clone()),
        })
    }

    fn version(&self) -> Result<GalaxyVersion, GalaxyError> {
        self.get_json("/api/version", &[])
    }
}
