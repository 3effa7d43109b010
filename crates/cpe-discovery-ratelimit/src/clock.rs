// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! An injectable clock (§9: "keeps tests deterministic — inject a fake
//! clock"). Returns `tokio::time::Instant` rather than `std::time::Instant`
//! so the real implementation composes with `tokio::time::sleep_until` and
//! with `#[tokio::test(start_paused = true)]` in callers' tests.

use tokio::time::Instant;

/// A source of the current instant. `SystemClock` is the production
/// default; tests can substitute a clock that moves in lockstep with
/// `tokio::time::advance`, or a clock fixed to a specific `Instant`.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Delegates to `tokio::time::Instant::now()`, which itself respects a
/// paused/advanced test-util clock when one is active.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
