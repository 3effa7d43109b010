// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! The NVD CPE catalog HTTP client (§4.F, §6 upstream interface).
//!
//! This is the only crate in the workspace that talks to the network.
//! Callers reach it through `cpe-discovery-ratelimit`'s gate — this
//! client has no opinion about pacing, it only knows how to issue one
//! request and parse the reply.

mod envelope;
mod error;

use std::time::Duration;

use reqwest::Client;
use url::Url;

pub use envelope::{CatalogRecord, CatalogResponse};
pub use error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://services.nvd.nist.gov/rest/json/cpes/2.0";
const RESULTS_PER_PAGE: &str = "10";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A client for the NVD CPE catalog's two query modes (§6).
///
/// Cheaply `Clone` — `reqwest::Client` is internally reference-counted, so
/// cloning shares one connection pool rather than opening a new one.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl CatalogClient {
    /// Builds a client against the real NVD endpoint, with the
    /// recommended 30s per-request timeout (§5).
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(Url::parse(DEFAULT_BASE_URL)?, api_key)
    }

    /// Builds a client against an arbitrary base URL — used by tests to
    /// point at a `wiremock` server.
    pub fn with_base_url(base_url: Url, api_key: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(concat!("cpe-discovery/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(CatalogClient {
            http,
            base_url,
            api_key,
        })
    }

    /// Exact-match query: `cpeMatchString=<cpe>`.
    #[tracing::instrument(skip(self), fields(cpe = %cpe))]
    pub async fn search_exact(&self, cpe: &str) -> Result<CatalogResponse> {
        self.execute("cpeMatchString", cpe).await
    }

    /// Keyword query: `keywordSearch=<phrase>`.
    #[tracing::instrument(skip(self), fields(phrase = %phrase))]
    pub async fn search_keyword(&self, phrase: &str) -> Result<CatalogResponse> {
        self.execute("keywordSearch", phrase).await
    }

    async fn execute(&self, param: &str, value: &str) -> Result<CatalogResponse> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(param, value)
            .append_pair("resultsPerPage", RESULTS_PER_PAGE);

        let mut request = self.http.get(url);
        if let Some(api_key) = &self.api_key {
            request = request.header("apiKey", api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "NVD catalog returned non-2xx");
            return Err(Error::NonSuccessStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let raw: envelope::RawEnvelope = serde_json::from_str(&body)?;
        Ok(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const SAMPLE_BODY: &str = r#"{
        "totalResults": 1,
        "products": [
            {
                "cpe": {
                    "cpeName": "cpe:2.3:a:apache:http_server:2.4.51:*:*:*:*:*:*:*",
                    "cpeNameId": "ABC-123",
                    "deprecated": false,
                    "titles": [{"title": "Apache HTTP Server", "lang": "en"}]
                }
            }
        ]
    }"#;

    async fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::with_base_url(Url::parse(&server.uri()).unwrap(), None).unwrap()
    }

    #[tokio::test]
    async fn keyword_search_parses_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("keywordSearch", "apache http server"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.search_keyword("apache http server").await.unwrap();
        assert_eq!(response.total_results, 1);
        assert_eq!(response.records[0].cpe_name, "cpe:2.3:a:apache:http_server:2.4.51:*:*:*:*:*:*:*");
        assert!(!response.records[0].deprecated);
    }

    #[tokio::test]
    async fn exact_search_uses_cpe_match_string_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("cpeMatchString", "cpe:2.3:a:apache:http_server:2.4.51:*:*:*:*:*:*:*"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client
            .search_exact("cpe:2.3:a:apache:http_server:2.4.51:*:*:*:*:*:*:*")
            .await
            .unwrap();
        assert_eq!(response.records.len(), 1);
    }

    #[tokio::test]
    async fn non_2xx_status_is_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.search_keyword("anything").await.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn malformed_json_is_distinguishable_from_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.search_keyword("anything").await.unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
        assert!(!err.is_unavailable());
    }

    #[tokio::test]
    async fn missing_products_field_is_malformed_not_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"totalResults": 0}"#))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.search_keyword("anything").await.unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }
}
