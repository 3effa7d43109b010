// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! The ranking engine (§4.I): a stable sort of scored candidates by
//! composite score, descending, truncated to the caller's `topN`.

use cpe_discovery_score::CpeCandidate;

/// Hard cap on `top_n` regardless of what the caller asks for
/// (`ranking.top_n.max`, §6); the pipeline is responsible for clamping
/// the caller-supplied value against config before calling this, but
/// `rank` also clamps defensively so it can never be asked to return
/// more candidates than it was given.
pub const DEFAULT_TOP_N: usize = 5;

/// Sorts `candidates` by `score` descending and returns the first
/// `top_n`. The sort is stable, so candidates with equal scores keep
/// their original relative order — the catalog's own ordering, which for
/// most keyword queries is newest-first (§4.I's rationale for this
/// tie-break).
pub fn rank(mut candidates: Vec<CpeCandidate>, top_n: usize) -> Vec<CpeCandidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(top_n);
    candidates
}
