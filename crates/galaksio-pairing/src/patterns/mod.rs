//! Naming patterns: supported formats, the mate-marker table, and stem
//! derivation.

pub mod catalog;
pub mod formats;
pub mod stem;

pub use catalog::{
    supported_patterns, MateRole, NamingPattern, PatternCatalog, PatternDescriptor, PatternFamily,
    NAMING_PATTERNS,
};
pub use formats::SUPPORTED_EXTENSIONS;
pub use stem::{match_mate, MateMatch};
