// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! A deliberately small version model: `{major, minor, patch, suffix}`.
//!
//! Industrial firmware routinely embeds a letter suffix on the trailing
//! numeric component (`10.0s0`); a naive dotted-integer comparator misranks
//! these against plain semantic versions, so the suffix is carried as its
//! own field and compared separately rather than folded into `patch`.
//!
//! This is intentionally not a general-purpose semver/PEP440 parser: it
//! never fails. Any input parses to *something*, because the scoring
//! engine (§4.H) must never raise on a ragged version string; the worst
//! case is every field defaulting to zero.

use std::fmt;

/// A version decomposed into its three numeric components and an optional
/// trailing alphanumeric suffix on the last component present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComparableVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub suffix: String,
}

impl ComparableVersion {
    /// Parses `raw`, stripping a leading `v`/`V` first. Never fails; an
    /// unparseable segment simply contributes `0`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw
            .strip_prefix('v')
            .or_else(|| raw.strip_prefix('V'))
            .unwrap_or(raw);

        let segments: Vec<&str> = trimmed.split('.').filter(|s| !s.is_empty()).take(3).collect();

        let mut major = 0u64;
        let mut minor = 0u64;
        let mut patch = 0u64;
        let mut suffix = String::new();

        for (index, segment) in segments.iter().enumerate() {
            let digit_count = segment.chars().take_while(|c| c.is_ascii_digit()).count();
            let (digits, tail) = segment.split_at(digit_count);
            let value = digits.parse::<u64>().unwrap_or(0);

            match index {
                0 => major = value,
                1 => minor = value,
                2 => patch = value,
                _ => {}
            }

            // The suffix belongs to whichever segment is last, overwriting
            // any suffix captured on an earlier (now not-last) segment.
            if index == segments.len() - 1 {
                suffix = tail.to_string();
            }
        }

        ComparableVersion {
            major,
            minor,
            patch,
            suffix,
        }
    }

    /// Re-serializes to the canonical `major.minor.patch<suffix>` form used
    /// by the idempotence property: `parse(parse(x).joined()) == parse(x)`.
    pub fn joined(&self) -> String {
        format!("{}.{}.{}{}", self.major, self.minor, self.patch, self.suffix)
    }

    /// All three numeric fields match (suffix is ignored).
    pub fn numeric_eq(&self, other: &Self) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }

    pub fn major_minor_eq(&self, other: &Self) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

impl fmt::Display for ComparableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// If `raw` is exactly four ASCII digits, returns it as a year. Used for
/// the "both are 4-digit year forms" scoring rule, which applies to the
/// whole raw version string, not the major/minor/patch decomposition.
pub fn four_digit_year(raw: &str) -> Option<i32> {
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        raw.parse::<i32>().ok()
    } else {
        None
    }
}
