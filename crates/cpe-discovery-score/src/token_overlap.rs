// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use std::collections::HashSet;

use cpe_discovery_foundation::jaccard;

/// §4.H token-overlap sub-score: plain Jaccard similarity of the
/// lowercased token sets, catching word-order permutations the
/// field-level scores miss.
pub fn score(asset_tokens: &[String], cpe_tokens: &[String]) -> (f64, &'static str) {
    let a: HashSet<String> = asset_tokens.iter().map(|t| t.to_lowercase()).collect();
    let b: HashSet<String> = cpe_tokens.iter().map(|t| t.to_lowercase()).collect();
    (jaccard(&a, &b), "token set Jaccard overlap")
}
