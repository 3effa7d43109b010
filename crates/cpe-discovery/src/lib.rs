// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! Public facade for the CPE discovery pipeline (§6).
//!
//! ```no_run
//! # async fn example() -> cpe_discovery::Result<()> {
//! use cpe_discovery::{CancellationToken, Discovery};
//! use tokio_stream::StreamExt;
//!
//! let discovery = Discovery::load()?;
//! let mut events = discovery.find_cpe("Apache HTTP Server 2.4.51", Some(5), CancellationToken::new());
//! while let Some(event) = events.next().await {
//!     println!("{event}");
//! }
//! # Ok(())
//! # }
//! ```

pub use cpe_discovery_config::Config;
pub use cpe_discovery_cpe::DeconstructedCpe;
pub use cpe_discovery_parser::ParsedAsset;
pub use cpe_discovery_pipeline::{
    CompletedPayload,
    DEFAULT_TOP_N,
    Error,
    EventKind,
    Phase,
    Pipeline,
    ProgressEvent,
    Result,
    ValidateCpeOutcome,
};
pub use cpe_discovery_score::{CpeCandidate, ScoreBreakdown};
pub use tokio_stream::wrappers::ReceiverStream;
pub use tokio_util::sync::CancellationToken;

/// A loaded, ready-to-use discovery pipeline — the thing most callers
/// want. Thin wrapper over [`Pipeline`] that adds config loading.
pub struct Discovery {
    pipeline: Pipeline,
}

impl Discovery {
    /// Loads the process-wide config (§10.3) and builds a pipeline over
    /// it.
    pub fn load() -> Result<Self> {
        let config = cpe_discovery_config::get_config()?;
        Self::from_config(&config)
    }

    /// Builds a pipeline over an explicit `config`, bypassing the
    /// process-wide cell entirely — the path a caller takes when it
    /// wants to control configuration itself rather than rely on
    /// environment/file discovery.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Discovery {
            pipeline: Pipeline::new(config)?,
        })
    }

    /// §6 `findCpe(assetName, topN?) -> stream<ProgressEvent>`.
    pub fn find_cpe(
        &self,
        asset_name: impl Into<String>,
        top_n: Option<usize>,
        cancellation: CancellationToken,
    ) -> ReceiverStream<ProgressEvent> {
        self.pipeline.find_cpe(asset_name, top_n, cancellation)
    }

    /// §6 `validateCpe(cpeString) -> {...}`.
    pub async fn validate_cpe(&self, cpe_string: &str) -> ValidateCpeOutcome {
        self.pipeline.validate_cpe(cpe_string).await
    }
}
