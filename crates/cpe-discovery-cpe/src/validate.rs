// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! Syntactic CPE validation (§4.D, syntactic phase only). The catalog
//! phase — an exact-match lookup against the NVD client — is composed on
//! top of this by the pipeline crate, which is the only crate in the
//! workspace that is allowed to know about HTTP.

use crate::deconstruct::{DeconstructedCpe, deconstruct};
use crate::error::Error;

const LEGACY_PREFIX: &str = "cpe:/";
const CURRENT_PREFIX: &str = "cpe:2.3:";
const VALID_PARTS: [&str; 3] = ["a", "o", "h"];

/// Outcome of the syntactic validation phase.
#[derive(Debug, Clone)]
pub struct SyntaxCheck {
    pub is_valid: bool,
    /// `None` when `is_valid` is `true`.
    pub reason: Option<Error>,
    pub deconstructed: DeconstructedCpe,
}

/// Checks that `raw` begins with `cpe:2.3:`, that `part` is one of
/// `a`/`o`/`h`, and that the vendor attribute is present and not a
/// wildcard. The legacy `cpe:/` prefix is detected explicitly and reported
/// with a dedicated error rather than silently upgraded.
pub fn check_syntax(raw: &str) -> SyntaxCheck {
    if raw.starts_with(LEGACY_PREFIX) {
        return SyntaxCheck {
            is_valid: false,
            reason: Some(Error::Legacy22Format),
            deconstructed: deconstruct(raw),
        };
    }

    if !raw.starts_with(CURRENT_PREFIX) {
        return SyntaxCheck {
            is_valid: false,
            reason: Some(Error::MissingPrefix),
            deconstructed: deconstruct(raw),
        };
    }

    let deconstructed = deconstruct(raw);

    if !deconstructed.valid || !VALID_PARTS.contains(&deconstructed.part.as_str()) {
        return SyntaxCheck {
            is_valid: false,
            reason: Some(Error::InvalidPart(deconstructed.part.clone())),
            deconstructed,
        };
    }

    if deconstructed.vendor.is_empty() || DeconstructedCpe::is_wildcard(&deconstructed.vendor) {
        return SyntaxCheck {
            is_valid: false,
            reason: Some(Error::MissingVendor),
            deconstructed,
        };
    }

    SyntaxCheck {
        is_valid: true,
        reason: None,
        deconstructed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_cpe() {
        let check = check_syntax("cpe:2.3:a:apache:http_server:2.4.51:*:*:*:*:*:*:*");
        assert!(check.is_valid);
        assert!(check.reason.is_none());
    }

    #[test]
    fn rejects_legacy_22_prefix_without_upgrading() {
        let check = check_syntax("cpe:/a:apache:http_server:2.4.51");
        assert!(!check.is_valid);
        assert_eq!(check.reason, Some(Error::Legacy22Format));
    }

    #[test]
    fn rejects_missing_vendor() {
        let check = check_syntax("cpe:2.3:a:*:http_server:2.4.51:*:*:*:*:*:*:*");
        assert!(!check.is_valid);
        assert_eq!(check.reason, Some(Error::MissingVendor));
    }

    #[test]
    fn rejects_bad_part() {
        let check = check_syntax("cpe:2.3:z:apache:http_server:2.4.51:*:*:*:*:*:*:*");
        assert!(!check.is_valid);
        assert_eq!(
            check.reason,
            Some(Error::InvalidPart("z".to_string()))
        );
    }

    #[test]
    fn rejects_missing_cpe23_prefix() {
        let check = check_syntax("not-a-cpe-at-all");
        assert!(!check.is_valid);
        assert_eq!(check.reason, Some(Error::MissingPrefix));
    }
}
