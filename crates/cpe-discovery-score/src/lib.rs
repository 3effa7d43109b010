// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! The similarity scoring engine (§4.H): four sub-scores in `[0, 1]`
//! combined into a weighted composite percentage. Every function here is
//! pure and total — a malformed CPE or an absent asset field degrades to
//! a defined partial-credit value rather than an error, per §1's
//! "deterministic and explainable" requirement.

mod candidate;
mod product;
mod token_overlap;
mod vendor;
mod version;

pub use candidate::{CpeCandidate, ScoreBreakdown, score_candidate};
