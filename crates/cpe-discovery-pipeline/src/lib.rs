// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! The discovery pipeline (§4.J, §5): composition of the parser,
//! progressive search orchestrator, scoring engine, and ranking engine
//! behind the two §6 entry points, plus the bounded progress channel and
//! cooperative cancellation that tie them together.

mod error;
mod observer;
mod pipeline;
mod progress;

pub use error::{Error, Result};
pub use pipeline::{DEFAULT_TOP_N, PROGRESS_CHANNEL_CAPACITY, Pipeline, ValidateCpeOutcome};
pub use progress::{CompletedPayload, EventKind, Phase, ProgressEvent};
