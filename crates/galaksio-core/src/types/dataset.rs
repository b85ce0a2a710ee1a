//! Dataset descriptors as reported by a Galaxy history.

use serde::{Deserialize, Serialize};

/// One dataset in a Galaxy history.
///
/// The detector only ever reads these. `size_bytes == 0` means the size is
/// unknown (Galaxy reports no size for queued or deferred datasets).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "file_size")]
    pub size_bytes: u64,
    #[serde(default, alias = "extension")]
    pub data_type: String,
    #[serde(default)]
    pub history_id: String,
}

impl DatasetDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        size_bytes: u64,
        data_type: impl Into<String>,
        history_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size_bytes,
            data_type: data_type.into(),
            history_id: history_id.into(),
        }
    }

    /// Whether Galaxy reported a size for this dataset.
    pub fn has_known_size(&self) -> bool {
        self.size_bytes > 0
    }
}
