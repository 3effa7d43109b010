// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! CPE 2.3 URI deconstruction (§4.C).

use cpe_discovery_foundation::normalize;

/// The 11 attributes of a CPE 2.3 URI, after `part`, plus the comparison
/// tokens derived from vendor/product/version.
///
/// Each attribute is either a literal string or the wildcard `"*"`. A CPE
/// string that fails the minimal shape check (§4.C) deconstructs to the
/// sentinel produced by [`DeconstructedCpe::sentinel`]: every attribute is
/// empty and `tokens` is empty, so the scoring engine can still run over
/// it and simply contribute zero everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeconstructedCpe {
    pub raw: String,
    pub valid: bool,
    pub part: String,
    pub vendor: String,
    pub product: String,
    pub version: String,
    pub update: String,
    pub edition: String,
    pub language: String,
    pub sw_edition: String,
    pub target_sw: String,
    pub target_hw: String,
    pub other: String,
    pub tokens: Vec<String>,
}

const WILDCARD: &str = "*";

impl DeconstructedCpe {
    fn sentinel(raw: &str) -> Self {
        DeconstructedCpe {
            raw: raw.to_string(),
            valid: false,
            part: String::new(),
            vendor: String::new(),
            product: String::new(),
            version: String::new(),
            update: String::new(),
            edition: String::new(),
            language: String::new(),
            sw_edition: String::new(),
            target_sw: String::new(),
            target_hw: String::new(),
            other: String::new(),
            tokens: Vec::new(),
        }
    }

    pub fn is_wildcard(value: &str) -> bool {
        value == WILDCARD
    }
}

/// Splits `raw` on `:` and maps fields 2..12 onto the 11 CPE attributes.
/// Requires at least 5 colon-separated fields (`cpe:2.3:<part>:<vendor>:<product>`
/// at minimum); anything shorter, or not prefixed `cpe:2.3:`, yields the
/// sentinel deconstruction.
pub fn deconstruct(raw: &str) -> DeconstructedCpe {
    let fields: Vec<&str> = raw.split(':').collect();

    if fields.len() < 5 || fields.first() != Some(&"cpe") || fields.get(1) != Some(&"2.3") {
        return DeconstructedCpe::sentinel(raw);
    }

    let field_at = |idx: usize| -> String { fields.get(idx).copied().unwrap_or(WILDCARD).to_string() };

    let part = field_at(2);
    let vendor = field_at(3);
    let product = field_at(4);
    let version = field_at(5);
    let update = field_at(6);
    let edition = field_at(7);
    let language = field_at(8);
    let sw_edition = field_at(9);
    let target_sw = field_at(10);
    let target_hw = field_at(11);
    let other = field_at(12);

    let tokens = build_tokens(&vendor, &product, &version);

    DeconstructedCpe {
        raw: raw.to_string(),
        valid: true,
        part,
        vendor,
        product,
        version,
        update,
        edition,
        language,
        sw_edition,
        target_sw,
        target_hw,
        other,
        tokens,
    }
}

/// Lowercases the non-wildcard vendor/product/version and splits each on
/// `_`, `-`, `.`, and whitespace, dropping empty segments, preserving
/// first-occurrence order.
fn build_tokens(vendor: &str, product: &str, version: &str) -> Vec<String> {
    let mut parts = Vec::new();
    for field in [vendor, product, version] {
        if DeconstructedCpe::is_wildcard(field) || field.is_empty() {
            continue;
        }
        parts.push(field);
    }

    let mut seen = std::collections::HashSet::new();
    let mut tokens = Vec::new();
    for part in parts {
        for raw_token in part.split(['_', '-', '.', ' ', '\t']) {
            if raw_token.is_empty() {
                continue;
            }
            let token = normalize::normalize(raw_token);
            if token.is_empty() {
                continue;
            }
            for sub in token.split_whitespace() {
                if seen.insert(sub.to_string()) {
                    tokens.push(sub.to_string());
                }
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn deconstructs_full_cpe() {
        let cpe = deconstruct("cpe:2.3:a:apache:http_server:2.4.51:*:*:*:*:*:*:*");
        assert!(cpe.valid);
        assert_eq!(cpe.part, "a");
        assert_eq!(cpe.vendor, "apache");
        assert_eq!(cpe.product, "http_server");
        assert_eq!(cpe.version, "2.4.51");
        assert_eq!(cpe.update, "*");
        assert!(cpe.tokens.contains(&"apache".to_string()));
        assert!(cpe.tokens.contains(&"http".to_string()));
        assert!(cpe.tokens.contains(&"server".to_string()));
    }

    #[rstest]
    #[case("not-a-cpe")]
    #[case("cpe:2.3:a")]
    #[case("cpe:2.2:/a:vendor:product")]
    fn sentinel_on_malformed_input(#[case] raw: &str) {
        let cpe = deconstruct(raw);
        assert!(!cpe.valid);
        assert!(cpe.tokens.is_empty());
        assert_eq!(cpe.vendor, "");
    }

    #[test]
    fn wildcard_fields_are_preserved_verbatim() {
        let cpe = deconstruct("cpe:2.3:a:openssl:openssl:*:*:*:*:*:*:*:*");
        assert_eq!(cpe.version, "*");
        assert!(!cpe.tokens.iter().any(|t| t == "*"));
    }

    #[test]
    fn missing_trailing_fields_default_to_wildcard() {
        let cpe = deconstruct("cpe:2.3:h:ewon:cosy_131");
        assert!(cpe.valid);
        assert_eq!(cpe.version, "*");
        assert_eq!(cpe.other, "*");
    }
}
