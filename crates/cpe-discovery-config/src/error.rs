// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot load config, lock has been poisoned: {0}")]
    LockPoisonedRead(String),
    #[error("cannot update config, lock has been poisoned: {0}")]
    LockPoisonedWrite(String),

    #[error("scoring.weights must sum to 1.0 (got {0})")]
    WeightsDoNotSumToOne(f64),

    #[error("ranking.top_n.max must be positive (got {0})")]
    TopNMaxNotPositive(usize),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
