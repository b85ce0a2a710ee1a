//! The naming pattern table.
//!
//! Order matters: when two markers of equal length match the same name, the
//! earlier entry wins.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::formats::SUPPORTED_EXTENSIONS;

/// Group of naming conventions considered mutually compatible for pairing.
/// Mates are only ever paired within one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFamily {
    /// `_R1`/`_R2`, `_R1_001`/`_R2_001`, `.R1`/`.R2`.
    Illumina,
    /// `_read1`/`_read2`.
    ReadWord,
    /// `_forward`/`_reverse`, `_fwd`/`_rev`.
    Directional,
    /// `_1`/`_2`, `_1_001`/`_2_001`.
    Numeric,
}

impl PatternFamily {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Illumina => "illumina",
            Self::ReadWord => "read_word",
            Self::Directional => "directional",
            Self::Numeric => "numeric",
        }
    }
}

impl fmt::Display for PatternFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which mate a marker designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MateRole {
    /// Read 1.
    Forward,
    /// Read 2.
    Reverse,
}

impl MateRole {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }
}

impl fmt::Display for MateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A static naming rule: one marker suffix per mate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamingPattern {
    /// Stable identifier, reported as a group's `pair_type`.
    pub id: &'static str,
    pub family: PatternFamily,
    /// Sequencing platform convention the markers come from.
    pub platform: &'static str,
    pub read1_suffix: &'static str,
    pub read2_suffix: &'static str,
    /// How specific the marker is, in (0, 1]. Feeds confidence scoring.
    pub strength: f64,
    /// Accept the marker when a single `_tag` follows it (`x_R1_dup`).
    pub allows_trailing_tag: bool,
}

impl NamingPattern {
    /// The marker suffix for `role`.
    pub fn suffix(&self, role: MateRole) -> &'static str {
        match role {
            MateRole::Forward => self.read1_suffix,
            MateRole::Reverse => self.read2_suffix,
        }
    }
}

/// The ordered pattern table.
pub static NAMING_PATTERNS: &[NamingPattern] = &[
    NamingPattern {
        id: "illumina_r1_r2_001",
        family: PatternFamily::Illumina,
        platform: "Illumina (bcl2fastq lane output)",
        read1_suffix: "_R1_001",
        read2_suffix: "_R2_001",
        strength: 1.0,
        allows_trailing_tag: false,
    },
    NamingPattern {
        id: "illumina_r1_r2",
        family: PatternFamily::Illumina,
        platform: "Illumina",
        read1_suffix: "_R1",
        read2_suffix: "_R2",
        strength: 1.0,
        allows_trailing_tag: true,
    },
    NamingPattern {
        id: "illumina_dot_r1_r2",
        family: PatternFamily::Illumina,
        platform: "Illumina",
        read1_suffix: ".R1",
        read2_suffix: ".R2",
        strength: 0.95,
        allows_trailing_tag: false,
    },
    NamingPattern {
        id: "read1_read2",
        family: PatternFamily::ReadWord,
        platform: "Generic",
        read1_suffix: "_read1",
        read2_suffix: "_read2",
        strength: 0.85,
        allows_trailing_tag: true,
    },
    NamingPattern {
        id: "forward_reverse",
        family: PatternFamily::Directional,
        platform: "PacBio/ONT",
        read1_suffix: "_forward",
        read2_suffix: "_reverse",
        strength: 0.8,
        allows_trailing_tag: true,
    },
    NamingPattern {
        id: "fwd_rev",
        family: PatternFamily::Directional,
        platform: "PacBio/ONT",
        read1_suffix: "_fwd",
        read2_suffix: "_rev",
        strength: 0.75,
        allows_trailing_tag: true,
    },
    NamingPattern {
        id: "numeric_1_2_001",
        family: PatternFamily::Numeric,
        platform: "SRA / generic",
        read1_suffix: "_1_001",
        read2_suffix: "_2_001",
        strength: 0.7,
        allows_trailing_tag: false,
    },
    NamingPattern {
        id: "numeric_1_2",
        family: PatternFamily::Numeric,
        platform: "SRA / generic",
        read1_suffix: "_1",
        read2_suffix: "_2",
        strength: 0.7,
        allows_trailing_tag: true,
    },
];

/// Look up a pattern by id.
pub fn pattern_by_id(id: &str) -> Option<&'static NamingPattern> {
    NAMING_PATTERNS.iter().find(|p| p.id == id)
}

/// Serializable description of one naming pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDescriptor {
    pub id: String,
    pub family: PatternFamily,
    pub platform: String,
    pub read1_suffix: String,
    pub read2_suffix: String,
    pub strength: f64,
    pub allows_trailing_tag: bool,
    pub description: String,
}

impl From<&NamingPattern> for PatternDescriptor {
    fn from(p: &NamingPattern) -> Self {
        let mut description = format!(
            "Files ending in '{}' pair with files ending in '{}'",
            p.read1_suffix, p.read2_suffix
        );
        if p.allows_trailing_tag {
            description.push_str(" (a single trailing '_tag' is tolerated)");
        }
        Self {
            id: p.id.to_string(),
            family: p.family,
            platform: p.platform.to_string(),
            read1_suffix: p.read1_suffix.to_string(),
            read2_suffix: p.read2_suffix.to_string(),
            strength: p.strength,
            allows_trailing_tag: p.allows_trailing_tag,
            description,
        }
    }
}

/// Read-only view of everything the detector recognizes, for help text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternCatalog {
    pub patterns: Vec<PatternDescriptor>,
    pub supported_extensions: Vec<String>,
}

/// Describe the pattern table and the supported extensions, in table order.
pub fn supported_patterns() -> PatternCatalog {
    PatternCatalog {
        patterns: NAMING_PATTERNS.iter().map(PatternDescriptor::from).collect(),
        supported_extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
    }
}
