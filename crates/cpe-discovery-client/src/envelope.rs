// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! The NVD catalog JSON envelope (§4.F) and the subset of it the rest of
//! the workspace actually consumes.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEnvelope {
    pub total_results: u64,
    pub products: Vec<RawProduct>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawProduct {
    pub cpe: RawCpe,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCpe {
    pub cpe_name: String,
    pub cpe_name_id: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub titles: Vec<RawTitle>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTitle {
    pub title: String,
    #[serde(default)]
    pub lang: String,
}

/// One catalog record, after resolving the display title (first `lang ==
/// "en"` title, falling back to the first title present, or an empty
/// string if the catalog sent none). Everything else in the envelope
/// (CVE references, deprecation chains, etc.) passes through unread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub cpe_name: String,
    pub cpe_name_id: String,
    pub deprecated: bool,
    pub title: String,
}

/// The parts of the envelope downstream components consume: the total
/// match count (which may exceed `records.len()` when the catalog caps
/// `resultsPerPage`) and the records themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogResponse {
    pub total_results: u64,
    pub records: Vec<CatalogRecord>,
}

impl From<RawEnvelope> for CatalogResponse {
    fn from(raw: RawEnvelope) -> Self {
        let records = raw
            .products
            .into_iter()
            .map(|product| {
                let title = product
                    .cpe
                    .titles
                    .iter()
                    .find(|t| t.lang == "en")
                    .or_else(|| product.cpe.titles.first())
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                CatalogRecord {
                    cpe_name: product.cpe.cpe_name,
                    cpe_name_id: product.cpe.cpe_name_id,
                    deprecated: product.cpe.deprecated,
                    title,
                }
            })
            .collect();
        CatalogResponse {
            total_results: raw.total_results,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_english_title_over_other_languages() {
        let raw = RawEnvelope {
            total_results: 1,
            products: vec![RawProduct {
                cpe: RawCpe {
                    cpe_name: "cpe:2.3:a:apache:http_server:2.4.51:*:*:*:*:*:*:*".into(),
                    cpe_name_id: "ABC-123".into(),
                    deprecated: false,
                    titles: vec![
                        RawTitle {
                            title: "Servidor HTTP Apache".into(),
                            lang: "es".into(),
                        },
                        RawTitle {
                            title: "Apache HTTP Server".into(),
                            lang: "en".into(),
                        },
                    ],
                },
            }],
        };
        let response: CatalogResponse = raw.into();
        assert_eq!(response.records[0].title, "Apache HTTP Server");
    }

    #[test]
    fn falls_back_to_first_title_when_no_english() {
        let raw = RawEnvelope {
            total_results: 1,
            products: vec![RawProduct {
                cpe: RawCpe {
                    cpe_name: "cpe:2.3:a:vendor:product:*:*:*:*:*:*:*:*".into(),
                    cpe_name_id: "id".into(),
                    deprecated: true,
                    titles: vec![RawTitle {
                        title: "Produit".into(),
                        lang: "fr".into(),
                    }],
                },
            }],
        };
        let response: CatalogResponse = raw.into();
        assert_eq!(response.records[0].title, "Produit");
        assert!(response.records[0].deprecated);
    }

    #[test]
    fn empty_titles_yields_empty_string() {
        let raw = RawEnvelope {
            total_results: 0,
            products: vec![RawProduct {
                cpe: RawCpe {
                    cpe_name: "cpe:2.3:a:vendor:product:*:*:*:*:*:*:*:*".into(),
                    cpe_name_id: "id".into(),
                    deprecated: false,
                    titles: vec![],
                },
            }],
        };
        let response: CatalogResponse = raw.into();
        assert_eq!(response.records[0].title, "");
    }
}
