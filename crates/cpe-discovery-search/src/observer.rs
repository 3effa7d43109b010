// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! The hook the pipeline crate uses to turn each outbound call into a
//! `{progress, searching, ...}` event (§4.J step 3) without this crate
//! needing to know anything about progress channels.

use async_trait::async_trait;

/// Notified once before every keyword search the orchestrator issues.
#[async_trait]
pub trait SearchObserver: Send + Sync {
    /// `current_count` is the size of the best result set obtained so
    /// far (`0` before the first call).
    async fn before_call(&self, query: &str, current_count: usize);
}

/// An observer that does nothing — the default for callers (and most
/// tests) that don't care about intermediate progress.
pub struct NoopObserver;

#[async_trait]
impl SearchObserver for NoopObserver {
    async fn before_call(&self, _query: &str, _current_count: usize) {}
}
