// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use std::collections::HashSet;

use cpe_discovery_foundation::{jaccard, levenshtein_ratio};

/// §4.H product sub-score: the maximum of a tokenized Jaccard similarity
/// and a whole-string Levenshtein ratio, with two override cases for
/// absence/wildcard.
pub fn score(asset_product: Option<&str>, cpe_product: &str) -> (f64, &'static str) {
    let Some(asset_product) = asset_product else {
        return (0.0, "asset product absent");
    };
    if cpe_product.is_empty() {
        return (0.0, "CPE product missing (malformed CPE)");
    }
    if cpe_product == "*" {
        return (0.2, "CPE product is a wildcard");
    }

    let tokenized = tokenized_jaccard(asset_product, cpe_product);
    let ratio = levenshtein_ratio(&asset_product.to_lowercase(), &cpe_product.to_lowercase().replace('_', " "));

    if tokenized >= ratio {
        (tokenized, "tokenized Jaccard overlap")
    } else {
        (ratio, "Levenshtein ratio")
    }
}

/// Tokenizes both product strings on `_`, `-`, and whitespace, lowercases,
/// drops empty segments, and computes Jaccard similarity over the
/// resulting sets.
fn tokenized_jaccard(a: &str, b: &str) -> f64 {
    let tokens = |s: &str| -> HashSet<String> {
        s.split(['_', '-', ' '])
            .map(str::to_lowercase)
            .filter(|t| !t.is_empty())
            .collect()
    };
    jaccard(&tokens(a), &tokens(b))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, "http_server", 0.0)]
    #[case(Some("http server"), "", 0.0)]
    #[case(Some("http server"), "*", 0.2)]
    #[case(Some("http server"), "http_server", 1.0)]
    fn product_subscores(#[case] asset: Option<&str>, #[case] cpe: &str, #[case] expected: f64) {
        let (value, _why) = score(asset, cpe);
        assert!((value - expected).abs() < 1e-9);
    }

    #[test]
    fn wordpress_typo_scores_high_via_levenshtein() {
        let (value, why) = score(Some("wordpres"), "wordpress");
        assert!(value >= 0.88, "expected >= 0.88, got {value}");
        assert_eq!(why, "Levenshtein ratio");
    }

    #[test]
    fn word_order_permutation_scores_via_jaccard() {
        let (value, why) = score(Some("server http"), "http_server");
        assert_eq!(value, 1.0);
        assert_eq!(why, "tokenized Jaccard overlap");
    }
}
