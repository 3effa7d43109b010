// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Syntactic CPE validation failures (§7 `InvalidCpeFormat`). This crate
/// never talks to the network, so it has nothing else to report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("CPE 2.2 format detected; please supply a CPE 2.3 URI (cpe:2.3:...)")]
    Legacy22Format,
    #[error("CPE string must begin with 'cpe:2.3:'")]
    MissingPrefix,
    #[error("CPE 'part' attribute must be one of a, o, h; found '{0}'")]
    InvalidPart(String),
    #[error("CPE 'vendor' attribute is required and cannot be a wildcard")]
    MissingVendor,
}
