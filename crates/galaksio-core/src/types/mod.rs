//! Shared data types for Galaksio.

pub mod collection;
pub mod collections;
pub mod dataset;

pub use collection::{CollectionElement, CollectionRequest, CreatedCollection, LegacyCollectionRequest};
pub use collections::{FxHashMap, FxHashSet};
pub use dataset::DatasetDescriptor;
