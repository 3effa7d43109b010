// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// §7's error taxonomy, collapsed onto this crate's single `Error` type —
/// "distinct kinds, not type names" (SPEC_FULL §10.1). `cpe-discovery`
/// (the facade) re-exports this as its public error type.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// §7 `InvalidInput`: asset name too short, or `topN` out of range.
    #[error("{0}")]
    #[diagnostic(code(cpe_discovery::invalid_input))]
    InvalidInput(String),

    /// §7 `InvalidCpeFormat`: surfaced with the specific syntactic
    /// violation from `cpe-discovery-cpe`.
    #[error(transparent)]
    #[diagnostic(code(cpe_discovery::invalid_cpe_format))]
    InvalidCpeFormat(#[from] cpe_discovery_cpe::Error),

    /// §7 `UpstreamUnavailable`: network error, non-2xx, or timeout from
    /// the initial (fatal) catalog call.
    #[error("the NVD catalog is unavailable: {0}")]
    #[diagnostic(code(cpe_discovery::upstream_unavailable))]
    UpstreamUnavailable(#[source] cpe_discovery_client::Error),

    /// §7 `Cancelled`: consumer-initiated, via the pipeline's
    /// `CancellationToken`.
    #[error("discovery was cancelled")]
    #[diagnostic(code(cpe_discovery::cancelled))]
    Cancelled,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] cpe_discovery_config::Error),
}
