// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! The progressive search orchestrator (§4.G): issue an increasingly
//! specific keyword query against the NVD catalog until the result set is
//! small enough to rank, backing off the moment specificity overshoots to
//! an empty result.

mod error;
mod observer;

use cpe_discovery_client::{CatalogClient, CatalogRecord, CatalogResponse};
use cpe_discovery_parser::ParsedAsset;
use cpe_discovery_ratelimit::{RateLimitedCache, fingerprint};

pub use error::{Error, Result};
pub use observer::{NoopObserver, SearchObserver};

/// Default `search.narrow_target` (§12: the spec's open question resolves
/// to 10, overriding the conflicting inline "≤ 5" reference in the
/// source).
pub const DEFAULT_NARROW_TARGET: usize = 10;

/// The result of running the orchestrator to completion.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub records: Vec<CatalogRecord>,
    /// The catalog's own `totalResults` for the query that produced
    /// `records` — may exceed `records.len()` when the catalog caps
    /// `resultsPerPage`.
    pub total_found: u64,
    pub calls_made: usize,
    /// Set when a non-fatal upstream error (§7 `PartialNarrowing`) cut the
    /// narrowing short; `records` is still the best set obtained so far.
    pub warning: Option<String>,
}

/// Every outbound call the orchestrator makes passes through the §4.E
/// rate limiter and cache rather than hitting `client` directly.
async fn fetch_keyword(
    client: &CatalogClient,
    cache: &RateLimitedCache<CatalogResponse>,
    query: &str,
) -> std::result::Result<CatalogResponse, cpe_discovery_client::Error> {
    cache
        .get_or_fetch(fingerprint(None, Some(query)), || client.search_keyword(query))
        .await
}

/// Runs §4.G to completion against `parsed`, reporting every outbound
/// call to `observer` before it is made and gating every call through
/// `cache` (§4.E, §5: "every call to the NVD client... is a suspension
/// point" behind the rate limiter).
pub async fn orchestrate(
    client: &CatalogClient,
    cache: &RateLimitedCache<CatalogResponse>,
    parsed: &ParsedAsset,
    narrow_target: usize,
    observer: &dyn SearchObserver,
) -> Result<SearchOutcome> {
    let base_query = compose_base_query(parsed);

    observer.before_call(&base_query, 0).await;
    let r0 = fetch_keyword(client, cache, &base_query)
        .await
        .map_err(Error::InitialSearchFailed)?;
    let mut calls_made = 1;

    if r0.records.len() <= narrow_target {
        return Ok(SearchOutcome {
            records: r0.records,
            total_found: r0.total_results,
            calls_made,
            warning: None,
        });
    }

    if let Some(version) = &parsed.version {
        let query = format!("{base_query} {version}");
        observer.before_call(&query, r0.records.len()).await;
        match fetch_keyword(client, cache, &query).await {
            Ok(rv) => {
                calls_made += 1;
                if !rv.records.is_empty() && rv.records.len() <= narrow_target {
                    return Ok(SearchOutcome {
                        records: rv.records,
                        total_found: rv.total_results,
                        calls_made,
                        warning: None,
                    });
                }
                if rv.records.is_empty() {
                    return Ok(SearchOutcome {
                        records: r0.records,
                        total_found: r0.total_results,
                        calls_made,
                        warning: None,
                    });
                }
                // Overshoot: `rv` is discarded and narrowing continues
                // from the looser `r0` set, per §4.G step 6.
            }
            Err(err) => {
                calls_made += 1;
                return Ok(SearchOutcome {
                    records: r0.records,
                    total_found: r0.total_results,
                    calls_made,
                    warning: Some(format!("upstream error while narrowing by version: {err}")),
                });
            }
        }
    }

    if parsed.version_candidates.is_empty() {
        return Ok(SearchOutcome {
            records: r0.records,
            total_found: r0.total_results,
            calls_made,
            warning: None,
        });
    }

    let mut current = r0.records;
    let mut current_total = r0.total_results;
    let mut query = base_query;

    for candidate in &parsed.version_candidates {
        query = format!("{query} {candidate}");
        observer.before_call(&query, current.len()).await;
        match fetch_keyword(client, cache, &query).await {
            Ok(rn) => {
                calls_made += 1;
                if rn.records.is_empty() {
                    return Ok(SearchOutcome {
                        records: current,
                        total_found: current_total,
                        calls_made,
                        warning: None,
                    });
                }
                if rn.records.len() <= narrow_target {
                    return Ok(SearchOutcome {
                        records: rn.records,
                        total_found: rn.total_results,
                        calls_made,
                        warning: None,
                    });
                }
                current = rn.records;
                current_total = rn.total_results;
            }
            Err(err) => {
                calls_made += 1;
                return Ok(SearchOutcome {
                    records: current,
                    total_found: current_total,
                    calls_made,
                    warning: Some(format!("upstream error during narrowing: {err}")),
                });
            }
        }
    }

    Ok(SearchOutcome {
        records: current,
        total_found: current_total,
        calls_made,
        warning: None,
    })
}

/// §4.G step 1: `vendor`/`product` collapse to one term when equal
/// (self-named products), otherwise join with a single space; falls back
/// to the raw asset text when neither is known.
fn compose_base_query(parsed: &ParsedAsset) -> String {
    match (&parsed.vendor, &parsed.product) {
        (Some(vendor), Some(product)) if vendor == product => vendor.clone(),
        (Some(vendor), Some(product)) => format!("{vendor} {product}"),
        (Some(vendor), None) => vendor.clone(),
        (None, Some(product)) => product.clone(),
        (None, None) => parsed.raw.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use cpe_discovery_client::CatalogClient;
    use url::Url;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// A rate limiter with no gap, so tests don't pay the production
    /// `min_interval` in wall-clock time.
    fn test_cache() -> RateLimitedCache<CatalogResponse> {
        RateLimitedCache::new(std::time::Duration::ZERO, std::time::Duration::from_secs(300))
    }

    fn records(n: usize) -> String {
        let products: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{"cpe":{{"cpeName":"cpe:2.3:a:vendor:product:{i}:*:*:*:*:*:*:*","cpeNameId":"id-{i}","deprecated":false,"titles":[{{"title":"Product {i}","lang":"en"}}]}}}}"#
                )
            })
            .collect();
        format!(r#"{{"totalResults":{n},"products":[{}]}}"#, products.join(","))
    }

    struct CountingObserver {
        calls: Mutex<Vec<String>>,
    }

    impl CountingObserver {
        fn new() -> Self {
            CountingObserver {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl SearchObserver for CountingObserver {
        async fn before_call(&self, query: &str, _current_count: usize) {
            self.calls.lock().unwrap().push(query.to_string());
        }
    }

    #[tokio::test]
    async fn single_call_when_first_result_is_small() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("keywordSearch", "apache http_server"))
            .respond_with(ResponseTemplate::new(200).set_body_string(records(3)))
            .mount(&server)
            .await;

        let client = CatalogClient::with_base_url(Url::parse(&server.uri()).unwrap(), None).unwrap();
        let parsed = ParsedAsset {
            raw: "Apache HTTP Server 2.4.51".into(),
            normalized: "apache http server 2451".into(),
            tokens: vec!["apache".into(), "http".into(), "server".into()],
            vendor: Some("apache".into()),
            product: Some("http_server".into()),
            version: Some("2.4.51".into()),
            version_candidates: vec!["2.4.51".into()],
        };

        let observer = CountingObserver::new();
        let cache = test_cache();
        let outcome = orchestrate(&client, &cache, &parsed, 10, &observer).await.unwrap();

        assert_eq!(outcome.calls_made, 1);
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(observer.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn version_overshoot_to_zero_backs_off_to_r0() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("keywordSearch", "openssl"))
            .respond_with(ResponseTemplate::new(200).set_body_string(records(15)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("keywordSearch", "openssl 9.9.9"))
            .respond_with(ResponseTemplate::new(200).set_body_string(records(0)))
            .mount(&server)
            .await;

        let client = CatalogClient::with_base_url(Url::parse(&server.uri()).unwrap(), None).unwrap();
        let parsed = ParsedAsset {
            raw: "OpenSSL 9.9.9".into(),
            normalized: "openssl 999".into(),
            tokens: vec!["openssl".into()],
            vendor: Some("openssl".into()),
            product: Some("openssl".into()),
            version: Some("9.9.9".into()),
            version_candidates: vec!["9.9.9".into()],
        };

        let cache = test_cache();
        let outcome = orchestrate(&client, &cache, &parsed, 10, &NoopObserver).await.unwrap();
        assert_eq!(outcome.calls_made, 2);
        assert_eq!(outcome.records.len(), 15);
    }

    #[tokio::test]
    async fn empty_base_result_returns_empty_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(records(0)))
            .mount(&server)
            .await;

        let client = CatalogClient::with_base_url(Url::parse(&server.uri()).unwrap(), None).unwrap();
        let parsed = ParsedAsset {
            raw: "Totally Unknown Thing".into(),
            normalized: "totally unknown thing".into(),
            tokens: vec!["totally".into(), "unknown".into(), "thing".into()],
            vendor: None,
            product: None,
            version: None,
            version_candidates: vec![],
        };

        let cache = test_cache();
        let outcome = orchestrate(&client, &cache, &parsed, 10, &NoopObserver).await.unwrap();
        assert_eq!(outcome.calls_made, 1);
        assert!(outcome.records.is_empty());
    }

    #[tokio::test]
    async fn initial_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = CatalogClient::with_base_url(Url::parse(&server.uri()).unwrap(), None).unwrap();
        let parsed = ParsedAsset {
            raw: "Thing".into(),
            normalized: "thing".into(),
            tokens: vec!["thing".into()],
            vendor: None,
            product: None,
            version: None,
            version_candidates: vec![],
        };

        let cache = test_cache();
        let result = orchestrate(&client, &cache, &parsed, 10, &NoopObserver).await;
        assert!(matches!(result, Err(Error::InitialSearchFailed(_))));
    }

    #[test]
    fn base_query_composition() {
        let self_named = ParsedAsset {
            raw: "nginx".into(),
            normalized: "nginx".into(),
            tokens: vec!["nginx".into()],
            vendor: Some("nginx".into()),
            product: Some("nginx".into()),
            version: None,
            version_candidates: vec![],
        };
        assert_eq!(compose_base_query(&self_named), "nginx");

        let distinct = ParsedAsset {
            raw: "Apache HTTP Server".into(),
            normalized: "apache http server".into(),
            tokens: vec!["apache".into(), "http".into(), "server".into()],
            vendor: Some("apache".into()),
            product: Some("http server".into()),
            version: None,
            version_candidates: vec![],
        };
        assert_eq!(compose_base_query(&distinct), "apache http server");

        let neither = ParsedAsset {
            raw: "???".into(),
            normalized: "".into(),
            tokens: vec![],
            vendor: None,
            product: None,
            version: None,
            version_candidates: vec![],
        };
        assert_eq!(compose_base_query(&neither), "???");
    }
}
