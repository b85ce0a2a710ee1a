//! GalaxyApi trait: the seam between pairing logic and the Galaxy server.
//!
//! The HTTP client in `galaksio-galaxy` implements it for real servers;
//! tests substitute in-memory fakes.

use serde::{Deserialize, Serialize};

use crate::errors::GalaxyError;
use crate::types::{CollectionRequest, CreatedCollection, DatasetDescriptor};

/// Version information reported by `GET /api/version`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GalaxyVersion {
    #[serde(default)]
    pub version_major: String,
    #[serde(default)]
    pub version_minor: String,
}

impl GalaxyVersion {
    /// Major release number, if it parses (e.g. `"25.0"` -> 25).
    pub fn major(&self) -> Option<u32> {
        self.version_major.split('.').next()?.trim().parse().ok()
    }

    /// Whether the server accepts the 25.0+ collection description shape.
    /// Unknown versions are assumed modern.
    pub fn supports_modern_collections(&self) -> bool {
        self.major().map_or(true, |major| major >= 25)
    }
}

/// Operations on a Galaxy server that paired-read handling depends on.
pub trait GalaxyApi: Send + Sync {
    /// List the live datasets of a history, in the order Galaxy reports them.
    fn history_contents(&self, history_id: &str) -> Result<Vec<DatasetDescriptor>, GalaxyError>;

    /// Create a paired dataset collection in a history.
    fn create_paired_collection(
        &self,
        history_id: &str,
        request: &CollectionRequest,
    ) -> Result<CreatedCollection, GalaxyError>;

    /// Server version information.
    fn version(&self) -> Result<GalaxyVersion, GalaxyError>;
}
