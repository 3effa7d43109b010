// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use cpe_discovery_foundation::levenshtein_distance;

/// §4.H vendor sub-score. Checks are tried in the order given; the first
/// that applies wins. Corporate-suffix stripping is deliberately *not*
/// applied here (see DESIGN.md) — only the asset parser strips suffixes.
pub fn score(asset_vendor: Option<&str>, cpe_vendor: &str) -> (f64, &'static str) {
    let Some(asset_vendor) = asset_vendor else {
        return (0.0, "asset vendor absent");
    };
    if cpe_vendor.is_empty() {
        return (0.0, "CPE vendor missing (malformed CPE)");
    }
    if cpe_vendor == "*" {
        return (0.3, "CPE vendor is a wildcard");
    }

    let asset_lower = asset_vendor.to_lowercase();
    let cpe_lower = cpe_vendor.to_lowercase();

    if asset_lower == cpe_lower {
        return (1.0, "case-insensitive match");
    }
    if asset_lower.contains(&cpe_lower) || cpe_lower.contains(&asset_lower) {
        return (0.7, "one vendor name is a substring of the other");
    }
    if levenshtein_distance(&asset_lower, &cpe_lower) <= 2 {
        return (0.5, "vendor name within edit distance 2");
    }
    (0.0, "vendor names do not match")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, "apache", 0.0)]
    #[case(Some("apache"), "", 0.0)]
    #[case(Some("apache"), "*", 0.3)]
    #[case(Some("Apache"), "apache", 1.0)]
    #[case(Some("apache"), "apache_software_foundation", 0.7)]
    #[case(Some("nginex"), "nginx", 0.5)]
    #[case(Some("acme"), "totallydifferent", 0.0)]
    fn vendor_subscores(#[case] asset: Option<&str>, #[case] cpe: &str, #[case] expected: f64) {
        let (value, _why) = score(asset, cpe);
        assert_eq!(value, expected);
    }
}
