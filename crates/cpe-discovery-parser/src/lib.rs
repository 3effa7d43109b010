// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! Heuristic vendor/product/version asset name parsing (§4.B).
//!
//! The parser is rule-based, not learned, so that a caller can always
//! explain why a given `ParsedAsset` came out the way it did — see the
//! design notes' "parsing heuristics vs. learned models" section.

use cpe_discovery_foundation::{
    is_known_vendor,
    is_non_vendor_word,
    normalize,
    normalize_version_preserving,
    strip_corporate_suffix,
    tokenize,
    extract_version,
    is_version_shaped,
};

/// The output of parsing a free-text asset descriptor. Immutable once
/// constructed; every field beyond `raw`/`normalized`/`tokens` is a
/// best-guess, hence the `Option`s.
///
/// Invariant: `tokens` never contains an entry equal to `version`, because
/// the version substring is removed from the text before tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAsset {
    pub raw: String,
    pub normalized: String,
    pub tokens: Vec<String>,
    pub vendor: Option<String>,
    pub product: Option<String>,
    pub version: Option<String>,
    pub version_candidates: Vec<String>,
}

/// Parses `raw` into a [`ParsedAsset`] following §4.B's five-step
/// procedure. Never fails: an empty or unparseable input simply yields a
/// `ParsedAsset` with every optional field absent.
pub fn parse(raw: &str) -> ParsedAsset {
    let normalized = normalize(raw);

    let extraction = extract_version(raw);
    let version = extraction.version.clone();

    let tokens = tokenize(&normalize(&extraction.rest));

    let vendor = extract_vendor(&tokens);
    let product = extract_product(&tokens, vendor.as_deref());

    let version_candidates = match &version {
        Some(v) => vec![v.clone()],
        None => version_shaped_candidates(&extraction.rest),
    };

    ParsedAsset {
        raw: raw.to_string(),
        normalized,
        tokens,
        vendor,
        product,
        version,
        version_candidates,
    }
}

/// Step 3: known-vendor lookup, then positional fallback, then "first
/// token no matter what". The known-vendor check is tried against the
/// raw token first (so names like `cisco` that end in a corporate-suffix
/// lookalike `co` aren't mis-stripped to `cis`), then against the
/// corporate-suffix-stripped form, matching §4.B's wording that the
/// stripping happens inside vendor extraction itself (not in scoring —
/// see the open question in §12 of the full spec).
fn extract_vendor(tokens: &[String]) -> Option<String> {
    if tokens.is_empty() {
        return None;
    }

    for token in tokens {
        if is_known_vendor(token) {
            return Some(token.clone());
        }
        let stripped = strip_corporate_suffix(token);
        if is_known_vendor(&stripped) {
            return Some(stripped);
        }
    }

    for token in tokens {
        if token.len() > 1 && !is_non_vendor_word(token) {
            return Some(strip_corporate_suffix(token));
        }
    }

    Some(strip_corporate_suffix(&tokens[0]))
}

/// Step 4: product extraction from the tokens remaining after every
/// occurrence of the chosen vendor token is removed. Asset names that
/// repeat the vendor as a self-naming prefix (`"eWon eWon Firmware"`) are
/// common enough that only stripping the first occurrence would leave a
/// stray vendor token masquerading as the product.
fn extract_product(tokens: &[String], vendor: Option<&str>) -> Option<String> {
    let Some(vendor) = vendor else {
        return None;
    };

    let remaining = remove_all(tokens, vendor);

    if remaining.is_empty() {
        return Some(vendor.to_string());
    }

    if is_known_vendor(&remaining[0]) {
        return Some(remaining[0].clone());
    }

    if let Some(first_qualifying) = remaining.iter().find(|t| !is_non_vendor_word(t) && t.len() > 1)
    {
        return Some(first_qualifying.clone());
    }

    let joined = remaining.iter().take(2).cloned().collect::<Vec<_>>().join(" ");
    if joined.is_empty() { None } else { Some(joined) }
}

/// Removes every token equal to `value` (matching on either the literal
/// token or its corporate-suffix-stripped form, since the vendor token
/// itself may have been stripped when it was chosen).
fn remove_all(tokens: &[String], value: &str) -> Vec<String> {
    tokens
        .iter()
        .filter(|token| token.as_str() != value && strip_corporate_suffix(token) != value)
        .cloned()
        .collect()
}

/// Step 5 fallback: tokens from the version-preserving normalization of
/// `rest` (i.e. the text with the (failed) version pre-extraction already
/// applied) that are entirely version-shaped, in order of appearance.
fn version_shaped_candidates(rest: &str) -> Vec<String> {
    tokenize(&normalize_version_preserving(rest))
        .into_iter()
        .filter(|t| is_version_shaped(t))
        .collect()
}
