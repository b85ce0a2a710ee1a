//! Paired-read detection: grouping datasets into forward/reverse mates.

pub mod naming;
pub mod paired_reads;
pub mod types;

pub use paired_reads::PairedReadDetector;
pub use types::{DetectionResult, PairedGroup, UnpairedDataset, UnpairedReason};
