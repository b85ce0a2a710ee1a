//! Paired dataset collection payloads exchanged with Galaxy.

use serde::{Deserialize, Serialize};

/// Galaxy collection type for a forward/reverse pair.
pub const PAIRED_COLLECTION_TYPE: &str = "paired";

/// Element name Galaxy expects for the read-1 mate.
pub const FORWARD_ELEMENT: &str = "forward";

/// Element name Galaxy expects for the read-2 mate.
pub const REVERSE_ELEMENT: &str = "reverse";

/// Source tag for history dataset associations.
pub const HDA_SOURCE: &str = "hda";

/// One element of a collection description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionElement {
    pub name: String,
    pub src: String,
    pub id: String,
}

impl CollectionElement {
    pub fn hda(name: &str, id: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            src: HDA_SOURCE.to_string(),
            id: id.into(),
        }
    }
}

/// Request payload for creating a paired collection.
///
/// Serializes to the Galaxy 25+ description shape. Older servers take the
/// same data under different keys, see [`LegacyCollectionRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRequest {
    pub collection_type: String,
    pub name: String,
    pub elements: Vec<CollectionElement>,
}

impl CollectionRequest {
    /// Build a paired request from the two mate dataset ids.
    pub fn paired(
        name: impl Into<String>,
        forward_id: impl Into<String>,
        reverse_id: impl Into<String>,
    ) -> Self {
        Self {
            collection_type: PAIRED_COLLECTION_TYPE.to_string(),
            name: name.into(),
            elements: vec![
                CollectionElement::hda(FORWARD_ELEMENT, forward_id),
                CollectionElement::hda(REVERSE_ELEMENT, reverse_id),
            ],
        }
    }

    /// Convert to the pre-25 payload shape.
    pub fn to_legacy(&self) -> LegacyCollectionRequest {
        LegacyCollectionRequest {
            name: self.name.clone(),
            collection_type: self.collection_type.clone(),
            element_identifiers: self.elements.clone(),
        }
    }
}

/// Collection description understood by Galaxy releases before 25.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCollectionRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub collection_type: String,
    pub element_identifiers: Vec<CollectionElement>,
}

/// Identity of a collection Galaxy created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCollection {
    pub collection_id: String,
    pub collection_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paired_request_json_shape() {
        let req = CollectionRequest::paired("exp_paired", "a1", "b2");
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["collection_type"], "paired");
        assert_eq!(v["elements"][0]["name"], "forward");
        assert_eq!(v["elements"][0]["src"], "hda");
        assert_eq!(v["elements"][1]["id"], "b2");
    }

    #[test]
    fn legacy_shape_uses_type_and_element_identifiers() {
        let legacy = CollectionRequest::paired("x", "1", "2").to_legacy();
        let v = serde_json::to_value(&legacy).unwrap();
        assert_eq!(v["type"], "paired");
        assert_eq!(v["element_identifiers"].as_array().unwrap().len(), 2);
        assert!(v.get("elements").is_none());
    }
}
