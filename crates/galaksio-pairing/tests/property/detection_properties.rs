use galaksio_core::types::DatasetDescriptor;
use galaksio_pairing::PairedReadDetector;
use proptest::prelude::*;

const MARKERS: &[&str] = &[
    "_R1", "_R2", "_R1_001", "_R2_001", ".R1", ".R2", "_read1", "_read2", "_forward",
    "_reverse", "_fwd", "_rev", "_1", "_2", "", "_dup",
];
const EXTENSIONS: &[&str] = &[".fastq", ".fq.gz", ".fa", ".bam", ".txt", ".html"];

fn dataset_name() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["a", "b", "sample", "exp", "S1_L001"]),
        prop::sample::select(MARKERS.to_vec()),
        prop::sample::select(MARKERS.to_vec()),
        prop::sample::select(EXTENSIONS.to_vec()),
    )
        .prop_map(|(stem, m1, m2, ext)| format!("{stem}{m1}{m2}{ext}"))
}

fn history() -> impl Strategy<Value = Vec<DatasetDescriptor>> {
    prop::collection::vec((dataset_name(), 0u64..5000), 1..24).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (name, size))| DatasetDescriptor::new(format!("d{i}"), name, size, "", "h"))
            .collect()
    })
}

proptest! {
    #[test]
    fn every_supported_dataset_lands_in_exactly_one_place(input in history()) {
        let result = PairedReadDetector::default().detect(&input).unwrap();

        let mut seen: Vec<&str> = Vec::new();
        for g in &result.paired_groups {
            seen.extend(g.dataset_ids());
        }
        for u in &result.unpaired {
            seen.push(&u.dataset.id);
        }
        let unique: std::collections::HashSet<&str> = seen.iter().copied().collect();
        prop_assert_eq!(unique.len(), seen.len(), "a dataset appeared twice");

        let supported = input
            .iter()
            .filter(|d| galaksio_pairing::patterns::formats::classify(&d.name, &d.data_type).is_some())
            .count();
        prop_assert_eq!(seen.len(), supported);
        prop_assert_eq!(result.total_pairs, result.paired_groups.len());
        prop_assert_eq!(result.total_unpaired, result.unpaired.len());
    }

    #[test]
    fn detection_is_deterministic(input in history()) {
        let detector = PairedReadDetector::default();
        let a = serde_json::to_string(&detector.detect(&input).unwrap()).unwrap();
        let b = serde_json::to_string(&detector.detect(&input).unwrap()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn confidence_is_bounded_and_ordered(input in history()) {
        let result = PairedReadDetector::default().detect(&input).unwrap();
        for g in &result.paired_groups {
            prop_assert!((0.0..=1.0).contains(&g.confidence));
            prop_assert_ne!(&g.forward.id, &g.reverse.id);
            prop_assert!(g.suggested_name.ends_with("_paired"));
        }
        for pair in result.paired_groups.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn closer_sizes_never_lower_confidence(base in 1u64..10_000, near in 0u64..100, far in 100u64..5_000) {
        let detector = PairedReadDetector::default();
        let score = |delta: u64| {
            let input = [
                DatasetDescriptor::new("1", "s_R1.fastq", base, "", "h"),
                DatasetDescriptor::new("2", "s_R2.fastq", base + delta, "", "h"),
            ];
            detector.detect(&input).unwrap().paired_groups[0].confidence
        };
        prop_assert!(score(near) >= score(far));
    }
}
