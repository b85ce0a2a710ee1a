//! Paired-end read detection for Galaxy histories.
//!
//! Takes the datasets of one history and partitions them into forward/reverse
//! mate pairs plus an unpaired remainder, each pair carrying its naming
//! pattern, a confidence score, and a suggested collection name. Nothing in
//! this crate performs I/O.

pub mod collection;
pub mod confidence;
pub mod detector;
pub mod patterns;

pub use collection::build_request;
pub use detector::{DetectionResult, PairedGroup, PairedReadDetector, UnpairedDataset, UnpairedReason};
pub use patterns::{supported_patterns, PatternCatalog};
