// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! Text normalization, tokenization, and version pre-extraction (§4.A).
//!
//! Version pre-extraction runs on the raw string *before* tokenization so
//! that a dotted version number like `2.4.51` survives as one unit instead
//! of fragmenting into stray numeric tokens once punctuation is stripped.

use once_cell::sync::Lazy;
use regex::Regex;

/// Patterns tried in order, most specific first. The first match wins.
static VERSION_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        // v?D+.D+.D+(.D+)?([a-z]D*)?  e.g. "2.4.51", "10.0s0"
        Regex::new(r"(?i)\bv?\d+\.\d+\.\d+(?:\.\d+)?(?:[a-z]\d*)?\b").expect("valid regex"),
        // v?D+.D+([a-z]D*)?  e.g. "2.4", "1.0a"
        Regex::new(r"(?i)\bv?\d+\.\d+(?:[a-z]\d*)?\b").expect("valid regex"),
        // vD+(.D+)*  e.g. "v2", "v2.3"
        Regex::new(r"(?i)\bv\d+(?:\.\d+)*\b").expect("valid regex"),
    ]
});

/// Anything that isn't a letter or digit once `_`/`-` have been turned
/// into spaces.
static NON_ALNUM_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9 ]").expect("valid regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Result of running version pre-extraction over raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionExtraction {
    /// The canonical version string, leading `v`/`V` stripped, or `None`
    /// if no pattern matched.
    pub version: Option<String>,
    /// The input with the matched substring removed. Equal to the input
    /// verbatim when nothing matched.
    pub rest: String,
}

/// Runs the three version patterns over `input` in order and returns the
/// first match, with its leading `v`/`V` stripped and removed from the
/// remaining text.
pub fn extract_version(input: &str) -> VersionExtraction {
    for pattern in VERSION_PATTERNS.iter() {
        if let Some(m) = pattern.find(input) {
            let matched = m.as_str();
            let version = matched
                .strip_prefix('v')
                .or_else(|| matched.strip_prefix('V'))
                .unwrap_or(matched)
                .to_string();
            let mut rest = String::with_capacity(input.len() - matched.len());
            rest.push_str(&input[..m.start()]);
            rest.push_str(&input[m.end()..]);
            return VersionExtraction {
                version: Some(version),
                rest,
            };
        }
    }
    VersionExtraction {
        version: None,
        rest: input.to_string(),
    }
}

/// Lowercases, maps `_`/`-` to spaces, collapses whitespace, and drops
/// every other non-alphanumeric character. This is the default mode and
/// also strips `.`, so it must only be applied to text that has already
/// had its version substring removed by [`extract_version`].
pub fn normalize(input: &str) -> String {
    normalize_impl(input, false)
}

/// Like [`normalize`] but retains digits and `.`, for callers that still
/// need to recognize version-shaped tokens inside the normalized text
/// (see `versionCandidates` in the asset parser).
pub fn normalize_version_preserving(input: &str) -> String {
    normalize_impl(input, true)
}

fn normalize_impl(input: &str, preserve_dots: bool) -> String {
    let lowered = input.to_lowercase();
    let spaced = lowered.replace(['_', '-'], " ");
    let filtered: String = if preserve_dots {
        spaced
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || c.is_whitespace())
            .collect()
    } else {
        NON_ALNUM_SPACE.replace_all(&spaced, "").into_owned()
    };
    WHITESPACE.replace_all(filtered.trim(), " ").into_owned()
}

/// Splits already-normalized text on whitespace into meaningful tokens.
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .map(str::to_string)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Returns `true` if `token` matches one of the three version patterns in
/// its entirety, not just as a substring. Used for the `versionCandidates`
/// fallback once primary version pre-extraction has already failed.
pub fn is_version_shaped(token: &str) -> bool {
    VERSION_PATTERNS
        .iter()
        .any(|pattern| pattern.find(token).is_some_and(|m| m.start() == 0 && m.end() == token.len()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Apache HTTP Server 2.4.51", Some("2.4.51"), "apache http server")]
    #[case("eWon Firmware 10.0s0", Some("10.0s0"), "ewon firmware")]
    #[case("OpenSSL", None, "openssl")]
    #[case("product v2.3", Some("2.3"), "product")]
    #[case("tool v2", Some("2"), "tool")]
    fn version_pre_extraction(
        #[case] input: &str,
        #[case] expected_version: Option<&str>,
        #[case] expected_rest_contains: &str,
    ) {
        let extraction = extract_version(input);
        assert_eq!(extraction.version.as_deref(), expected_version);
        let normalized_rest = normalize(&extraction.rest);
        assert_eq!(normalized_rest, expected_rest_contains);
    }

    #[test]
    fn most_specific_pattern_wins() {
        // Must not fragment into "2", "4", "51".
        let extraction = extract_version("SIMATIC S7-1500 Firmware v2.9.4");
        assert_eq!(extraction.version.as_deref(), Some("2.9.4"));
    }

    #[test]
    fn tokens_never_contain_punctuation() {
        let normalized = normalize("Siemens_SIMATIC-S7/1500!!");
        let tokens = tokenize(&normalized);
        assert_eq!(tokens, vec!["siemens", "simatic", "s71500"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize(&normalize("")).is_empty());
    }

    #[rstest]
    #[case("2.4.51", true)]
    #[case("v2.3", true)]
    #[case("firmware", false)]
    #[case("24", false)]
    fn version_shape_detection(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_version_shaped(token), expected);
    }
}
