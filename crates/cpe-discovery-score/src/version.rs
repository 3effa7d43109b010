// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use cpe_discovery_foundation::version::{ComparableVersion, four_digit_year};

/// §4.H version sub-score: exact match beats decomposed
/// major/minor/patch comparison, which beats the 4-digit "year version"
/// special case used by products like Ubuntu's `20.04` or appliance
/// firmware dated by year.
pub fn score(asset_version: Option<&str>, cpe_version: &str) -> (f64, &'static str) {
    let Some(asset_version) = asset_version else {
        return (0.3, "asset version absent");
    };
    if cpe_version.is_empty() {
        return (0.0, "CPE version missing (malformed CPE)");
    }
    if cpe_version == "*" {
        return (0.3, "CPE version is a wildcard");
    }
    if asset_version.eq_ignore_ascii_case(cpe_version) {
        return (1.0, "exact match");
    }

    let asset_parsed = ComparableVersion::parse(asset_version);
    let cpe_parsed = ComparableVersion::parse(cpe_version);

    if asset_parsed.numeric_eq(&cpe_parsed) {
        return (0.95, "major.minor.patch match");
    }
    if asset_parsed.major_minor_eq(&cpe_parsed) {
        return (0.8, "major.minor match, patch differs");
    }
    if asset_parsed.major == cpe_parsed.major {
        return (0.5, "major version matches only");
    }

    if let (Some(asset_year), Some(cpe_year)) =
        (four_digit_year(asset_version), four_digit_year(cpe_version))
    {
        if asset_year == cpe_year {
            return (1.0, "year form match");
        }
        if (asset_year - cpe_year).abs() <= 1 {
            return (0.6, "adjacent year form");
        }
    }

    (0.0, "versions do not match")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, "2.4.51", 0.3)]
    #[case(Some("2.4.51"), "", 0.0)]
    #[case(Some("2.4.51"), "*", 0.3)]
    #[case(Some("2.4.51"), "2.4.51", 1.0)]
    #[case(Some("17.3.1"), "17.3.2", 0.8)]
    #[case(Some("17.0.0"), "17.9.9", 0.5)]
    #[case(Some("2021"), "2021", 1.0)]
    #[case(Some("2021"), "2020", 0.6)]
    #[case(Some("2021"), "2018", 0.0)]
    fn version_subscores(#[case] asset: Option<&str>, #[case] cpe: &str, #[case] expected: f64) {
        let (value, _why) = score(asset, cpe);
        assert_eq!(value, expected);
    }

    #[test]
    fn industrial_suffix_matches_exactly() {
        let (value, why) = score(Some("10.0s0"), "10.0s0");
        assert_eq!(value, 1.0);
        assert_eq!(why, "exact match");
    }
}
