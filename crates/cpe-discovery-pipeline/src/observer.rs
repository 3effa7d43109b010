// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! Turns every outbound call the search orchestrator makes into a
//! `{progress, searching, ...}` event (§4.J step 3).

use async_trait::async_trait;
use cpe_discovery_search::SearchObserver;
use tokio::sync::mpsc;

use crate::progress::{Phase, ProgressEvent};

pub(crate) struct ChannelObserver {
    pub(crate) tx: mpsc::Sender<ProgressEvent>,
}

#[async_trait]
impl SearchObserver for ChannelObserver {
    async fn before_call(&self, query: &str, current_count: usize) {
        let message =
            format!("Searching NVD catalog for \"{query}\" (best result count so far: {current_count})…");
        // Backpressure is intentional here (§5): if the consumer isn't
        // draining, this send blocks rather than dropping the event,
        // which in turn blocks the orchestrator's next outbound call.
        let _ = self.tx.send(ProgressEvent::progress(Phase::Searching, message)).await;
    }
}
