// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! Fixed lexicons consumed by vendor extraction. These are data, not logic,
//! per the design notes' guidance to keep the lists separate from the
//! scoring/parsing code so they can be revised without touching either.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase vendor names that the parser recognizes outright, before
/// falling back to positional heuristics.
pub const KNOWN_VENDORS: &[&str] = &[
    "microsoft",
    "apple",
    "google",
    "apache",
    "oracle",
    "ibm",
    "cisco",
    "adobe",
    "mozilla",
    "linux",
    "canonical",
    "redhat",
    "debian",
    "ubuntu",
    "openssl",
    "openssh",
    "nginx",
    "php",
    "python",
    "nodejs",
    "java",
    "wordpress",
    "drupal",
    "joomla",
    "magento",
    "prestashop",
    "samsung",
    "huawei",
    "dell",
    "hp",
    "lenovo",
    "asus",
    "acer",
    "vmware",
    "citrix",
    "fortinet",
    "paloalto",
    "checkpoint",
    "ewon",
    "hms",
    "siemens",
    "schneider",
    "rockwell",
    "honeywell",
];

/// Generic technology nouns and filler words that must never be mistaken
/// for a vendor name during positional fallback.
pub const NON_VENDOR_WORDS: &[&str] = &[
    "server",
    "client",
    "firmware",
    "software",
    "hardware",
    "driver",
    "http",
    "https",
    "ftp",
    "ssh",
    "ssl",
    "tls",
    "tcp",
    "udp",
    "web",
    "mail",
    "dns",
    "proxy",
    "gateway",
    "firewall",
    "router",
    "the",
    "for",
    "and",
    "with",
    "pro",
    "enterprise",
    "professional",
    "standard",
    "edition",
    "version",
    "update",
    "patch",
    "release",
];

static KNOWN_VENDOR_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| KNOWN_VENDORS.iter().copied().collect());

static NON_VENDOR_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NON_VENDOR_WORDS.iter().copied().collect());

/// Trailing corporate suffix, case-insensitive: `inc`, `corp`, `ltd`,
/// `llc`, `gmbh`, `co`.
static CORPORATE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(inc|corp|ltd|llc|gmbh|co)$").expect("static regex is valid"));

/// Returns `true` if `token` (already lowercased) names a known vendor.
pub fn is_known_vendor(token: &str) -> bool {
    KNOWN_VENDOR_SET.contains(token)
}

/// Returns `true` if `token` (already lowercased) is a stop-word that
/// should never be chosen as a vendor or product token.
pub fn is_non_vendor_word(token: &str) -> bool {
    NON_VENDOR_WORD_SET.contains(token)
}

/// Strips a trailing corporate suffix (`inc`, `corp`, `ltd`, `llc`, `gmbh`,
/// `co`) from `token`, case-insensitively. Only the trailing match is
/// removed; the rest of the token is returned lowercased and untouched.
pub fn strip_corporate_suffix(token: &str) -> String {
    CORPORATE_SUFFIX.replace(token, "").into_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("siemens", true)]
    #[case("ewon", true)]
    #[case("acme", false)]
    fn known_vendor_membership(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_known_vendor(token), expected);
    }

    #[rstest]
    #[case("firmware", true)]
    #[case("enterprise", true)]
    #[case("siemens", false)]
    fn non_vendor_membership(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_non_vendor_word(token), expected);
    }

    #[rstest]
    #[case("acmeinc", "acme")]
    #[case("ACME Corp", "ACME ")]
    #[case("widgetsgmbh", "widgets")]
    #[case("nosuffixhere", "nosuffixhere")]
    fn corporate_suffix_stripping(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_corporate_suffix(input), expected);
    }
}
