// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! The §6 "Configuration surface" as a layered, process-wide `Config`.
//!
//! Components still take an explicit `Config` (or a narrower slice of it)
//! as a constructor argument per §9's guidance to avoid module-level
//! mutable state driving the *algorithm* — the global cell here is purely
//! a default-loading convenience for callers (the CLI, tests that don't
//! care) that don't want to thread one through by hand.

mod config;
mod error;

pub use config::{Cache, Config, Nvd, Ranking, Scoring, Search, TopN, Weights, get_config, load_config};
pub use error::{Error, Result};
