// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Only the orchestrator's *first* outbound call (§4.G step 2) is fatal;
/// every later error is absorbed into a `PartialNarrowing` warning on the
/// returned [`crate::SearchOutcome`] instead of propagating. See §7.
#[derive(Debug, Error)]
pub enum Error {
    #[error("initial keyword search failed: {0}")]
    InitialSearchFailed(#[source] cpe_discovery_client::Error),
}
