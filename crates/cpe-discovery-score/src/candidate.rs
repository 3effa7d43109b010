// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use cpe_discovery_config::Weights;
use cpe_discovery_cpe::{DeconstructedCpe, deconstruct};
use cpe_discovery_parser::ParsedAsset;

use crate::{product, token_overlap, vendor, version};

/// The four §4.H sub-scores, each in `[0, 1]`, paired with a short
/// human-readable reason — §1 calls the engine "transparent", so a bare
/// float isn't enough on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub vendor: f64,
    pub vendor_why: String,
    pub product: f64,
    pub product_why: String,
    pub version: f64,
    pub version_why: String,
    pub token_overlap: f64,
    pub token_overlap_why: String,
}

impl ScoreBreakdown {
    /// `true` if every sub-score is within `[0, 1]`, matching the §8
    /// score-bounds invariant.
    pub fn in_bounds(&self) -> bool {
        [self.vendor, self.product, self.version, self.token_overlap]
            .iter()
            .all(|s| s.is_finite() && (0.0..=1.0).contains(s))
    }
}

/// A scored, deconstructed CPE paired with the catalog's display title and
/// stable catalog id (§3 `CpeCandidate`).
#[derive(Debug, Clone, PartialEq)]
pub struct CpeCandidate {
    pub cpe: DeconstructedCpe,
    pub title: String,
    pub cpe_name_id: String,
    pub deprecated: bool,
    pub breakdown: ScoreBreakdown,
    /// Composite percentage in `[0, 100]`, rounded to two decimal places.
    pub score: f64,
}

/// Scores one catalog record against `parsed`, deconstructing `cpe_name`
/// internally (§4.C is an implementation detail of the scorer from the
/// caller's point of view).
pub fn score_candidate(
    parsed: &ParsedAsset,
    cpe_name: &str,
    title: &str,
    cpe_name_id: &str,
    deprecated: bool,
    weights: &Weights,
) -> CpeCandidate {
    let cpe = deconstruct(cpe_name);

    let (vendor_score, vendor_why) = vendor::score(parsed.vendor.as_deref(), &cpe.vendor);
    let (product_score, product_why) = product::score(parsed.product.as_deref(), &cpe.product);
    let (version_score, version_why) = version::score(parsed.version.as_deref(), &cpe.version);
    let (token_overlap_score, token_overlap_why) = token_overlap::score(&parsed.tokens, &cpe.tokens);

    let breakdown = ScoreBreakdown {
        vendor: vendor_score,
        vendor_why: vendor_why.to_string(),
        product: product_score,
        product_why: product_why.to_string(),
        version: version_score,
        version_why: version_why.to_string(),
        token_overlap: token_overlap_score,
        token_overlap_why: token_overlap_why.to_string(),
    };

    let composite = weights.vendor * breakdown.vendor
        + weights.product * breakdown.product
        + weights.version * breakdown.version
        + weights.token_overlap * breakdown.token_overlap;

    let score = round2(100.0 * composite).clamp(0.0, 100.0);

    CpeCandidate {
        cpe,
        title: title.to_string(),
        cpe_name_id: cpe_name_id.to_string(),
        deprecated,
        breakdown,
        score,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
