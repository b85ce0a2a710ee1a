//! Supported sequence formats.
//!
//! A dataset is in scope for pairing when its name ends with one of
//! [`SUPPORTED_EXTENSIONS`], or, for names without a recognized suffix, when
//! Galaxy's datatype is a sequence type.

/// File extensions the detector recognizes, in catalog order.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    ".fastq",
    ".fq",
    ".fasta",
    ".fa",
    ".fas",
    ".fastq.gz",
    ".fq.gz",
    ".fasta.gz",
    ".fa.gz",
    ".fas.gz",
    ".bam",
    ".sam",
];

/// A dataset name split into its stem and recognized format extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatMatch<'a> {
    /// Name with the extension removed, original case.
    pub stem: &'a str,
    /// The extension as listed in [`SUPPORTED_EXTENSIONS`], or `None` when
    /// the dataset was admitted on its Galaxy datatype alone.
    pub extension: Option<&'static str>,
}

/// Strip the longest supported extension from `name` (case-insensitive).
pub fn strip_format_suffix(name: &str) -> Option<FormatMatch<'_>> {
    let lower = name.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .filter(|ext| lower.len() > ext.len() && lower.ends_with(*ext))
        .max_by_key(|ext| ext.len())
        .map(|ext| FormatMatch {
            stem: &name[..name.len() - ext.len()],
            extension: Some(ext),
        })
}

/// Whether a Galaxy datatype (`extension` field) names a sequence format.
///
/// Covers the fastq family (`fastqsanger`, `fastqillumina`, ...), `fasta`,
/// the bam family (`bam`, `unsorted.bam`, `qname_sorted.bam`), `sam`, and
/// their `.gz` forms.
pub fn is_sequence_data_type(data_type: &str) -> bool {
    let lower = data_type.trim().to_ascii_lowercase();
    let base = lower.strip_suffix(".gz").unwrap_or(&lower);
    base.starts_with("fastq")
        || base == "fasta"
        || base == "bam"
        || base.ends_with(".bam")
        || base == "sam"
}

/// Resolve a dataset's stem and format, or `None` if it is out of scope.
pub fn classify<'a>(name: &'a str, data_type: &str) -> Option<FormatMatch<'a>> {
    strip_format_suffix(name).or_else(|| {
        is_sequence_data_type(data_type).then_some(FormatMatch {
            stem: name,
            extension: None,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_extension_wins() {
        let m = strip_format_suffix("exp_R1.fastq.gz").unwrap();
        assert_eq!(m.stem, "exp_R1");
        assert_eq!(m.extension, Some(".fastq.gz"));
    }

    #[test]
    fn extension_match_is_case_insensitive_but_stem_keeps_case() {
        let m = strip_format_suffix("Sample_R2.FQ").unwrap();
        assert_eq!(m.stem, "Sample_R2");
        assert_eq!(m.extension, Some(".fq"));
    }

    #[test]
    fn unsupported_names_are_rejected() {
        assert!(strip_format_suffix("report.html").is_none());
        assert!(strip_format_suffix("counts.tsv.gz").is_none());
        // A bare extension has no stem.
        assert!(strip_format_suffix(".fastq").is_none());
    }

    #[test]
    fn galaxy_datatypes() {
        assert!(is_sequence_data_type("fastqsanger"));
        assert!(is_sequence_data_type("fastqsanger.gz"));
        assert!(is_sequence_data_type("FASTA"));
        assert!(is_sequence_data_type("unsorted.bam"));
        assert!(is_sequence_data_type("sam"));
        assert!(!is_sequence_data_type("tabular"));
        assert!(!is_sequence_data_type("vcf"));
        assert!(!is_sequence_data_type(""));
    }

    #[test]
    fn datatype_admits_names_without_extension() {
        let m = classify("exp_R1", "fastqsanger").unwrap();
        assert_eq!(m.stem, "exp_R1");
        assert_eq!(m.extension, None);
        assert!(classify("exp_R1", "txt").is_none());
    }
}
