// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// §7's `UpstreamUnavailable` and `UpstreamMalformed` kinds, as they
/// surface from this crate specifically.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to reach the NVD catalog: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("NVD catalog returned HTTP {0}")]
    NonSuccessStatus(u16),

    #[error("NVD catalog response could not be decoded: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid NVD base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl Error {
    /// `true` for the kinds that map to §7 `UpstreamUnavailable` (as
    /// opposed to `UpstreamMalformed`, which is `Error::Malformed`).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::NonSuccessStatus(_))
    }
}
