// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! The discovery pipeline (§4.J): composes the parser, progressive search
//! orchestrator, scoring engine, and ranking engine, and exposes the two
//! §6 entry points.

use std::sync::Arc;
use std::time::Duration;

use cpe_discovery_client::CatalogClient;
use cpe_discovery_config::{Config, Weights};
use cpe_discovery_cpe::DeconstructedCpe;
use cpe_discovery_ratelimit::{RateLimitedCache, fingerprint};
use cpe_discovery_rank::rank;
use cpe_discovery_score::score_candidate;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::observer::ChannelObserver;
use crate::progress::{CompletedPayload, Phase, ProgressEvent};

/// §6 `findCpe`'s default `topN` when the caller doesn't specify one.
pub const DEFAULT_TOP_N: usize = 5;

/// §11: the progress channel's fixed depth. Bounded rather than
/// unbounded, per §5's backpressure requirement — a slow consumer makes
/// the producer (and therefore the orchestrator's next catalog call)
/// wait instead of buffering unboundedly.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 32;

/// The result of `validateCpe` (§6, entry point 2): non-streaming,
/// returns once a syntactic check (and, if that passes, a catalog
/// lookup) has completed.
#[derive(Debug, Clone)]
pub struct ValidateCpeOutcome {
    pub is_valid: bool,
    pub exists_in_catalog: bool,
    pub exact_match: bool,
    pub deprecated: bool,
    pub parsed: DeconstructedCpe,
    pub matches_found: usize,
    pub message: String,
}

/// Composes §4.B, §4.G, §4.H, §4.I behind the two §6 entry points.
///
/// Cheap to `Clone`: the HTTP client and the rate-limited cache are both
/// shared (the former internally, the latter via `Arc`), so a clone just
/// shares the same process-wide gate rather than duplicating it — which
/// matters because `find_cpe` clones `self` into a spawned task.
#[derive(Clone)]
pub struct Pipeline {
    client: CatalogClient,
    cache: Arc<RateLimitedCache<cpe_discovery_client::CatalogResponse>>,
    weights: Weights,
    narrow_target: usize,
    top_n_max: usize,
}

impl Pipeline {
    /// Builds a pipeline against the real NVD endpoint, using `config`
    /// for the rate-limiter interval, cache TTL, narrow target, scoring
    /// weights, and the caller-facing `topN` cap.
    pub fn new(config: &Config) -> Result<Self> {
        let client = CatalogClient::new(config.nvd.api_key.clone()).map_err(Error::UpstreamUnavailable)?;
        let cache = Arc::new(RateLimitedCache::new(
            Duration::from_millis(config.nvd.min_interval_ms),
            Duration::from_secs(config.cache.ttl_secs),
        ));
        Ok(Pipeline {
            client,
            cache,
            weights: config.scoring.weights.clone(),
            narrow_target: config.search.narrow_target,
            top_n_max: config.ranking.top_n.max,
        })
    }

    /// Assembles a pipeline from already-constructed parts. `Pipeline::new`
    /// always points `client` at the real NVD base URL, so tests that need
    /// a `wiremock` server use this instead.
    pub fn from_parts(
        client: CatalogClient,
        cache: Arc<RateLimitedCache<cpe_discovery_client::CatalogResponse>>,
        weights: Weights,
        narrow_target: usize,
        top_n_max: usize,
    ) -> Self {
        Pipeline {
            client,
            cache,
            weights,
            narrow_target,
            top_n_max,
        }
    }

    /// §6 `findCpe(assetName, topN?) -> stream<ProgressEvent>`.
    ///
    /// Validation failures (empty/too-short asset name, out-of-range
    /// `topN`) are reported as a single terminal `error` event rather
    /// than a `Result` error, so the return type stays a plain stream
    /// regardless of outcome — consistent with §4.J's "a fatal failure at
    /// any stage emits a terminal error event and closes the channel".
    pub fn find_cpe(
        &self,
        asset_name: impl Into<String>,
        top_n: Option<usize>,
        cancellation: CancellationToken,
    ) -> ReceiverStream<ProgressEvent> {
        let (tx, rx) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);
        let pipeline = self.clone();
        let asset_name = asset_name.into();
        tokio::spawn(async move {
            pipeline.run_find_cpe(asset_name, top_n, cancellation, tx).await;
        });
        ReceiverStream::new(rx)
    }

    #[tracing::instrument(skip(self, tx), fields(asset_name = %asset_name))]
    async fn run_find_cpe(
        &self,
        asset_name: String,
        top_n: Option<usize>,
        cancellation: CancellationToken,
        tx: mpsc::Sender<ProgressEvent>,
    ) {
        let trimmed = asset_name.trim();
        if trimmed.chars().count() < 2 {
            let _ = tx
                .send(ProgressEvent::error(
                    Phase::Parsing,
                    "asset name must be at least 2 characters after trimming",
                ))
                .await;
            return;
        }

        if let Some(n) = top_n {
            if !(1..=20).contains(&n) {
                let _ = tx
                    .send(ProgressEvent::error(Phase::Parsing, format!("topN must be in [1, 20], got {n}")))
                    .await;
                return;
            }
        }
        let top_n = top_n.unwrap_or(DEFAULT_TOP_N).min(self.top_n_max);

        if tx
            .send(ProgressEvent::progress(Phase::Parsing, "Parsing asset name…"))
            .await
            .is_err()
        {
            return;
        }

        if cancellation.is_cancelled() {
            let _ = tx.send(ProgressEvent::error(Phase::Parsing, "cancelled")).await;
            return;
        }

        let parsed = cpe_discovery_parser::parse(trimmed);

        let observer = ChannelObserver { tx: tx.clone() };
        let outcome = match cpe_discovery_search::orchestrate(
            &self.client,
            &self.cache,
            &parsed,
            self.narrow_target,
            &observer,
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(error = %err, "progressive search failed on its initial call");
                let _ = tx
                    .send(ProgressEvent::error(Phase::Searching, format!("search failed: {err}")))
                    .await;
                return;
            }
        };

        if cancellation.is_cancelled() {
            let _ = tx.send(ProgressEvent::error(Phase::Searching, "cancelled")).await;
            return;
        }

        if let Some(warning) = &outcome.warning {
            // §7 `PartialNarrowing`: not fatal, surfaced as a progress
            // event rather than terminating the stream.
            let _ = tx
                .send(ProgressEvent::progress(Phase::Searching, format!("narrowing incomplete: {warning}")))
                .await;
        }

        let _ = tx
            .send(ProgressEvent::progress(
                Phase::Scoring,
                format!("Scoring {} candidates…", outcome.records.len()),
            ))
            .await;

        let candidates: Vec<_> = outcome
            .records
            .iter()
            .map(|record| {
                score_candidate(
                    &parsed,
                    &record.cpe_name,
                    &record.title,
                    &record.cpe_name_id,
                    record.deprecated,
                    &self.weights,
                )
            })
            .collect();

        let ranked = rank(candidates, top_n);
        let count = ranked.len();

        let payload = CompletedPayload {
            parsed,
            candidates: ranked,
            count,
            total_found: outcome.total_found,
        };
        let _ = tx
            .send(ProgressEvent::completed(format!("Top {count} selected"), payload))
            .await;
    }

    /// §6 `validateCpe(cpeString) -> {...}`. Non-streaming. A syntactic
    /// failure short-circuits before the catalog is ever contacted.
    #[tracing::instrument(skip(self), fields(cpe = %cpe_string))]
    pub async fn validate_cpe(&self, cpe_string: &str) -> ValidateCpeOutcome {
        let check = cpe_discovery_cpe::check_syntax(cpe_string);
        if !check.is_valid {
            return ValidateCpeOutcome {
                is_valid: false,
                exists_in_catalog: false,
                exact_match: false,
                deprecated: false,
                parsed: check.deconstructed,
                matches_found: 0,
                message: check
                    .reason
                    .map(|reason| reason.to_string())
                    .unwrap_or_else(|| "invalid CPE".to_string()),
            };
        }

        let client = &self.client;
        let fetch = self
            .cache
            .get_or_fetch(fingerprint(Some(cpe_string), None), || client.search_exact(cpe_string))
            .await;

        match fetch {
            Ok(response) => {
                let exact = response.records.iter().find(|record| record.cpe_name == cpe_string);
                let deprecated = exact.or_else(|| response.records.first()).map(|r| r.deprecated).unwrap_or(false);
                let message = if exact.is_some() {
                    "exact match found in catalog".to_string()
                } else if !response.records.is_empty() {
                    "syntactically valid; partial match(es) found in catalog".to_string()
                } else {
                    "syntactically valid; no match found in catalog".to_string()
                };
                ValidateCpeOutcome {
                    is_valid: true,
                    exists_in_catalog: !response.records.is_empty(),
                    exact_match: exact.is_some(),
                    deprecated,
                    parsed: check.deconstructed,
                    matches_found: response.records.len(),
                    message,
                }
            }
            // §7: `UpstreamUnavailable` from the catalog phase still
            // reports the CPE as syntactically valid, just unverified.
            Err(err) => ValidateCpeOutcome {
                is_valid: true,
                exists_in_catalog: false,
                exact_match: false,
                deprecated: false,
                parsed: check.deconstructed,
                matches_found: 0,
                message: format!("syntactically valid; catalog verification unavailable: {err}"),
            },
        }
    }
}
