//! Mate-marker matching: split a format-stripped name into its pairing stem
//! and the mate role its marker designates.

use std::sync::LazyLock;

use regex::Regex;

use super::catalog::{MateRole, NamingPattern, NAMING_PATTERNS};

/// `<head>_<tag>` where the tag is a single alphanumeric token.
static TRAILING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)_([A-Za-z0-9]+)$").expect("static regex"));

/// Result of matching a mate marker at the end of a stem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MateMatch<'a> {
    /// Pairing stem with the marker (and any trailing tag) removed.
    pub stem: &'a str,
    pub role: MateRole,
    pub pattern: &'static NamingPattern,
    /// Tag that followed the marker, for loose matches.
    pub trailing_tag: Option<&'a str>,
}

impl MateMatch<'_> {
    /// Whether the marker only matched with a trailing tag after it.
    pub fn is_loose(&self) -> bool {
        self.trailing_tag.is_some()
    }
}

/// Match a mate marker at the end of `stem`.
///
/// Markers are compared case-insensitively and the longest matching marker
/// wins, so `_R1` is preferred over a looser marker that also fits. Only when
/// no marker ends the stem is a single trailing `_tag` allowed after it, and
/// only for patterns that tolerate one.
pub fn match_mate(stem: &str) -> Option<MateMatch<'_>> {
    if let Some(m) = match_suffix(stem, false) {
        return Some(m);
    }

    let caps = TRAILING_TAG_RE.captures(stem)?;
    let head = caps.get(1)?.as_str();
    let tag = caps.get(2)?.as_str();
    match_suffix(head, true).map(|m| MateMatch {
        trailing_tag: Some(tag),
        ..m
    })
}

fn match_suffix(stem: &str, tagged_only: bool) -> Option<MateMatch<'_>> {
    let lower = stem.to_ascii_lowercase();
    let mut best: Option<(usize, MateRole, &'static NamingPattern)> = None;

    for pattern in NAMING_PATTERNS {
        if tagged_only && !pattern.allows_trailing_tag {
            continue;
        }
        for role in [MateRole::Forward, MateRole::Reverse] {
            let suffix = pattern.suffix(role).to_ascii_lowercase();
            if lower.len() <= suffix.len() || !lower.ends_with(&suffix) {
                continue;
            }
            // Strictly longer only: earlier table entries keep ties.
            if best.map_or(true, |(len, _, _)| suffix.len() > len) {
                best = Some((suffix.len(), role, pattern));
            }
        }
    }

    best.map(|(len, role, pattern)| MateMatch {
        stem: &stem[..stem.len() - len],
        role,
        pattern,
        trailing_tag: None,
    })
}
