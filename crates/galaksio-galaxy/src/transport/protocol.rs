//! Galaxy REST wire types.

use galaksio_core::types::{CollectionRequest, DatasetDescriptor};
use serde::{Deserialize, Serialize};

/// Fields requested from `GET /api/histories/{id}/contents`.
pub const CONTENTS_KEYS: &str =
    "id,name,file_size,extension,history_id,deleted,purged,history_content_type";

/// `history_content_type` of plain datasets.
pub const DATASET_CONTENT_TYPE: &str = "dataset";

/// `type` field of a history-contents POST that creates a collection.
pub const DATASET_COLLECTION_TYPE: &str = "dataset_collection";

/// One entry of a history-contents listing. Galaxy sends `null` freely, so
/// every field except the id is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryContentItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub history_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub purged: bool,
    #[serde(default)]
    pub history_content_type: Option<String>,
}

impl HistoryContentItem {
    /// A dataset that is neither deleted nor purged. Items without a content
    /// type come from older servers that only list datasets.
    pub fn is_live_dataset(&self) -> bool {
        !self.deleted
            && !self.purged
            && self
                .history_content_type
                .as_deref()
                .map_or(true, |t| t == DATASET_CONTENT_TYPE)
    }

    pub fn into_descriptor(self, history_id: &str) -> DatasetDescriptor {
        DatasetDescriptor::new(
            self.id,
            self.name.unwrap_or_default(),
            self.file_size.unwrap_or(0),
            self.extension.unwrap_or_default(),
            self.history_id.unwrap_or_else(|| history_id.to_string()),
        )
    }
}

/// The part of a created collection we keep.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of a modern (25.0+) collection-creation POST.
#[derive(Debug, Serialize)]
pub struct ModernCollectionBody<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(flatten)]
    pub request: &'a CollectionRequest,
}

impl<'a> ModernCollectionBody<'a> {
    pub fn new(request: &'a CollectionRequest) -> Self {
        Self {
            kind: DATASET_COLLECTION_TYPE,
            request,
        }
    }
}

/// Live datasets of a contents listing, in listing order.
pub fn live_datasets(items: Vec<HistoryContentItem>, history_id: &str) -> Vec<DatasetDescriptor> {
    items
        .into_iter()
        .filter(HistoryContentItem::is_live_dataset)
        .map(|item| item.into_descriptor(history_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_deleted_purged_and_collections() {
        let json = r#"[
            {"id":"a","name":"x_R1.fastq","file_size":10,"extension":"fastqsanger","history_content_type":"dataset"},
            {"id":"b","name":"x_R2.fastq","deleted":true,"history_content_type":"dataset"},
            {"id":"c","name":"old.fastq","purged":true},
            {"id":"d","name":"pairs","history_content_type":"dataset_collection"},
            {"id":"e","name":null,"file_size":null,"extension":null}
        ]"#;
        let items: Vec<HistoryContentItem> = serde_json::from_str(json).unwrap();
        let live = live_datasets(items, "h1");
        let ids: Vec<&str> = live.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["a", "e"]);
        assert_eq!(live[0].size_bytes, 10);
        assert_eq!(live[0].data_type, "fastqsanger");
        assert_eq!(live[1].history_id, "h1");
        assert_eq!(live[1].name, "");
    }

    #[test]
    fn modern_body_flattens_request() {
        let request = CollectionRequest::paired("exp_paired", "a", "b");
        let v = serde_json::to_value(ModernCollectionBody::new(&request)).unwrap();
        assert_eq!(v["type"], "dataset_collection");
        assert_eq!(v["collection_type"], "paired");
        assert_eq!(v["name"], "exp_paired");
        assert_eq!(v["elements"][1]["name"], "reverse");
    }
}
