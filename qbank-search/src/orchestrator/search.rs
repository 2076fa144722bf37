//! Core search orchestrator: concurrent adapter fan-out, merge, rank, truncate.
//!
//! Checks the store, queries the scoped adapters concurrently under a
//! per-adapter deadline, absorbs adapter failures, appends the filtered
//! navigation catalog, ranks title matches first and truncates to the
//! requested limit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::adapters::run_adapter;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::navigation::NavigationCatalog;
use crate::query::{normalize, Normalized, SearchQuery};
use crate::store::DocumentStore;
use crate::types::{ResultType, SearchRequest, SearchResponse, SearchResult};

use super::rank::{merge, rank, truncate};

/// The federated search entry point.
///
/// Holds the shared store, the navigation catalog built at startup and the
/// validated configuration. Cheap to clone; clones share the store and
/// catalog.
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn DocumentStore>,
    catalog: Arc<NavigationCatalog>,
    config: SearchConfig,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("catalog_entries", &self.catalog.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SearchService {
    /// Create a service over `store` with an injected navigation catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        catalog: Arc<NavigationCatalog>,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            store,
            catalog,
            config,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn catalog(&self) -> &NavigationCatalog {
        &self.catalog
    }

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Store`] if it is not.
    pub async fn ping(&self) -> Result<(), SearchError> {
        self.store.ping().await
    }

    /// Run one federated search.
    ///
    /// # Pipeline
    ///
    /// 1. Normalize; a too-short query returns the full catalog with
    ///    `totalResults = 0`
    /// 2. Ping the store; failure here is the only error returned
    /// 3. Fan out to the scoped adapters with [`futures::future::join_all`]
    /// 4. Log failed or timed-out adapters at warn level; they contribute nothing
    /// 5. Concatenate in fixed source order, then the filtered catalog
    /// 6. Partition title matches first
    /// 7. Truncate to the clamped limit
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Store`] if the store is unavailable, or
    /// [`SearchError::Query`] if the query text cannot be matched literally.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let started = Instant::now();
        tracing::trace!(query = %request.query, "search requested");

        let query = match normalize(request, &self.config)? {
            Normalized::TooShort => {
                return Ok(SearchResponse {
                    results: self.catalog.all(),
                    total_results: 0,
                    search_time_ms: elapsed_ms(started),
                });
            }
            Normalized::Ready(query) => query,
        };

        self.store.ping().await.inspect_err(|err| {
            tracing::error!(error = %err, "store unavailable, aborting search");
        })?;

        let mut groups = self.fan_out(&query).await;
        groups.push(self.catalog.filter(&query.pattern));

        let ranked = rank(merge(groups), &query.pattern);
        let (results, total_results) = truncate(ranked, query.limit);

        let search_time_ms = elapsed_ms(started);
        tracing::debug!(
            returned = results.len(),
            total_results,
            search_time_ms,
            "search complete"
        );

        Ok(SearchResponse {
            results,
            total_results,
            search_time_ms,
        })
    }

    /// Query every scoped adapter concurrently.
    ///
    /// Returns one group per scoped source, in fixed source order regardless
    /// of completion order. Failed sources yield an empty group.
    async fn fan_out(&self, query: &SearchQuery) -> Vec<Vec<SearchResult>> {
        let deadline = Duration::from_millis(self.config.adapter_timeout_ms);
        let store: &dyn DocumentStore = self.store.as_ref();

        let futures: Vec<_> = query
            .scope
            .sources()
            .into_iter()
            .map(|source| {
                let cap = self.config.cap_for(source);
                let pattern = &query.pattern;
                async move {
                    let outcome =
                        match tokio::time::timeout(deadline, run_adapter(source, store, pattern, cap))
                            .await
                        {
                            Ok(outcome) => outcome,
                            Err(_) => Err(SearchError::Timeout(format!(
                                "{source} adapter exceeded {}ms",
                                deadline.as_millis()
                            ))),
                        };
                    (source, outcome)
                }
            })
            .collect();

        let outcomes = futures::future::join_all(futures).await;
        outcomes.into_iter().map(absorb).collect()
    }
}

/// Turn one adapter outcome into its contribution, logging failures.
fn absorb((source, outcome): (ResultType, Result<Vec<SearchResult>, SearchError>)) -> Vec<SearchResult> {
    match outcome {
        Ok(results) => {
            tracing::debug!(%source, count = results.len(), "adapter returned results");
            results
        }
        Err(err) => {
            tracing::warn!(%source, error = %err, "adapter failed, contributing no results");
            Vec::new()
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Collection, MemoryStore};
    use serde_json::json;

    fn service(store: MemoryStore) -> SearchService {
        SearchService::new(
            Arc::new(store),
            Arc::new(NavigationCatalog::default()),
            SearchConfig::default(),
        )
        .expect("valid config")
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SearchConfig {
            user_cap: 0,
            ..Default::default()
        };
        let result = SearchService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(NavigationCatalog::default()),
            config,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn short_query_returns_catalog() {
        let svc = service(MemoryStore::new());
        let response = svc.search(&SearchRequest::new("a")).await.expect("search");
        assert_eq!(response.total_results, 0);
        assert_eq!(response.results, NavigationCatalog::default().all());
    }

    #[test]
    fn absorb_substitutes_empty_on_failure() {
        let contribution = absorb((
            ResultType::Course,
            Err(SearchError::Store("unreachable".into())),
        ));
        assert!(contribution.is_empty());
    }

    #[tokio::test]
    async fn groups_follow_source_order() {
        let store = MemoryStore::new()
            .with_documents(Collection::Agents, vec![json!({"id": "a1", "name": "zeta agent"})])
            .with_documents(Collection::Courses, vec![json!({"id": "c1", "title": "Zeta Functions"})]);
        let svc = service(store);
        let response = svc
            .search(&SearchRequest::new("zeta"))
            .await
            .expect("search");
        let ids: Vec<_> = response.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["course-c1", "agent-a1"]);
        assert_eq!(response.total_results, 2);
    }
}
