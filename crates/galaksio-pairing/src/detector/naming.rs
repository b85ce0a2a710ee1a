//! Suggested collection names.

use std::sync::LazyLock;

use regex::Regex;

/// Characters Galaxy accepts in collection names without escaping.
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("static regex"));

/// Suffix appended to every suggested name.
pub const PAIRED_SUFFIX: &str = "_paired";

/// Name used when the stem sanitizes to nothing.
pub const FALLBACK_NAME: &str = "paired_collection";

/// Sanitize `stem` into Galaxy's allowed character set.
///
/// Runs of disallowed characters collapse into one `_`; leading and trailing
/// separators are trimmed.
pub fn sanitize(stem: &str) -> String {
    DISALLOWED_RE
        .replace_all(stem, "_")
        .trim_matches(|c| c == '_' || c == '.' || c == '-')
        .to_string()
}

/// Suggested collection name for a pair sharing `stem`.
pub fn suggested_name(stem: &str) -> String {
    let clean = sanitize(stem);
    if clean.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        format!("{clean}{PAIRED_SUFFIX}")
    }
}
