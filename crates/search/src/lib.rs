//! Search boundary.
//!
//! Provides the `SearchBackend` trait and an offline fixture backend that
//! serves pre-fetched results from JSON. The research engine never talks to
//! a backend directly; callers collect results here, grouped by the kind of
//! query that found them, and hand the final set to the engine.

use brandcheck_features::generate_variants;
use brandcheck_model::{ResearchRequest, SearchResult, SearchResultSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

/// Product keywords beyond this count are ignored when building queries.
pub const MAX_PRODUCT_KEYWORDS: usize = 2;

/// Errors from search backend operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Returned by backends for a query they could not answer.
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// Trait for search backends.
pub trait SearchBackend {
    /// Run one plain-text query.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Get the backend name for logging.
    fn name(&self) -> &'static str;
}

/// Which extractor a query feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Trademark,
    Company,
    CommonLaw,
}

/// One query term and the kind of evidence it looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedQuery {
    pub kind: QueryKind,
    pub text: String,
}

impl PlannedQuery {
    pub fn new(kind: QueryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A query that failed without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverableGap {
    pub query: String,
    pub kind: QueryKind,
    pub backend: String,
    pub reason: String,
}

/// Everything gathered for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub results: SearchResultSet,
    pub gaps: Vec<RecoverableGap>,
}

/// Build the queries for a brand: registry queries for the name and each
/// variant, a company-register query, and web usage queries for the name
/// and each product keyword.
pub fn build_queries(
    brand_name: &str,
    variants: &[String],
    product_keywords: &[String],
) -> Vec<PlannedQuery> {
    let brand = brand_name.trim();
    if brand.is_empty() {
        return Vec::new();
    }

    let mut queries = vec![
        PlannedQuery::new(QueryKind::Trademark, format!("\"{}\" trademark", brand)),
        PlannedQuery::new(
            QueryKind::Trademark,
            format!("\"{}\" trademark registration status class", brand),
        ),
        PlannedQuery::new(
            QueryKind::Company,
            format!("\"{}\" company registered private limited", brand),
        ),
        PlannedQuery::new(QueryKind::CommonLaw, format!("\"{}\" brand instagram website", brand)),
    ];
    for variant in variants {
        queries.push(PlannedQuery::new(QueryKind::Trademark, format!("\"{}\" trademark", variant)));
    }
    for keyword in product_keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .take(MAX_PRODUCT_KEYWORDS)
    {
        queries.push(PlannedQuery::new(QueryKind::CommonLaw, format!("\"{}\" {}", brand, keyword)));
    }

    let mut seen = HashSet::new();
    queries.retain(|q| seen.insert((q.kind, q.text.to_lowercase())));
    queries
}

/// Queries for a full research request.
pub fn queries_for_request(request: &ResearchRequest) -> Vec<PlannedQuery> {
    let variants = generate_variants(&request.brand_name);
    build_queries(&request.brand_name, &variants, &request.product_keywords)
}

/// Run every query against `backend` and file the hits under the query's
/// kind. Within a kind, results are de-duplicated by (url, title) in
/// first-seen order; failed queries become gaps.
pub async fn collect_results<B: SearchBackend>(backend: &B, queries: &[PlannedQuery]) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();
    let mut seen: HashSet<(QueryKind, String, String)> = HashSet::new();

    for query in queries {
        match backend.search(&query.text).await {
            Ok(hits) => {
                let fetched = hits.len();
                let group = match query.kind {
                    QueryKind::Trademark => &mut outcome.results.trademark,
                    QueryKind::Company => &mut outcome.results.company,
                    QueryKind::CommonLaw => &mut outcome.results.common_law,
                };
                for hit in hits {
                    if seen.insert((query.kind, hit.url.clone(), hit.title.clone())) {
                        group.push(hit);
                    }
                }
                tracing::debug!(
                    backend = backend.name(),
                    query = %query.text,
                    kind = ?query.kind,
                    fetched,
                    "Search query complete"
                );
            }
            Err(e) => {
                tracing::warn!(
                    backend = backend.name(),
                    query = %query.text,
                    kind = ?query.kind,
                    error = %e,
                    "Search query failed"
                );
                outcome.gaps.push(RecoverableGap {
                    query: query.text.clone(),
                    kind: query.kind,
                    backend: backend.name().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    outcome
}

/// Fixture backend configuration.
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// JSON file with pre-fetched results
    pub path: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("fixtures/results.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    /// Same results for every query
    Flat(Vec<SearchResult>),
    /// Results keyed by exact query string
    ByQuery(BTreeMap<String, Vec<SearchResult>>),
}

/// Serves pre-fetched results from a JSON fixture.
#[derive(Debug, Clone)]
pub struct FixtureBackend {
    fixture: FixtureFile,
}

impl FixtureBackend {
    /// Read and parse the fixture file.
    pub async fn load(config: &FixtureConfig) -> Result<Self, SearchError> {
        let raw = tokio::fs::read_to_string(&config.path)
            .await
            .map_err(|source| SearchError::Io {
                path: config.path.clone(),
                source,
            })?;
        let backend = Self::from_json_str(&raw)?;
        tracing::debug!(path = %config.path.display(), "Loaded search fixture");
        Ok(backend)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SearchError> {
        Ok(Self {
            fixture: serde_json::from_str(raw)?,
        })
    }

    /// Every result in the fixture, ignoring query keys.
    pub fn all_results(&self) -> Vec<SearchResult> {
        match &self.fixture {
            FixtureFile::Flat(results) => results.clone(),
            FixtureFile::ByQuery(map) => map.values().flatten().cloned().collect(),
        }
    }
}

impl SearchBackend for FixtureBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(match &self.fixture {
            FixtureFile::Flat(results) => results.clone(),
            FixtureFile::ByQuery(map) => map.get(query).cloned().unwrap_or_default(),
        })
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
