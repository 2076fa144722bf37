//! # qbank-search
//!
//! Federated global search for the question bank.
//!
//! One free-text query is run against every record collection the
//! application keeps (users, questions, courses, AI agents, audit logs)
//! plus a static catalog of navigation pages, and the hits come back as a
//! single ranked list in a unified result schema.
//!
//! ## Design
//!
//! - One stateless adapter per collection, each with its own field set and
//!   result mapping
//! - Adapters run concurrently; a failing or slow adapter contributes
//!   nothing instead of failing the request
//! - Queries are matched literally and case-insensitively
//! - Title matches rank ahead of everything else; emission order is kept
//!   otherwise
//! - The store is behind the [`DocumentStore`] trait; [`MemoryStore`] is
//!   the bundled implementation
//!
//! ## Security
//!
//! - Query text is logged only at trace level
//! - Agent system prompts are searchable but never returned

pub mod adapters;
pub mod config;
pub mod enrich;
pub mod error;
pub mod navigation;
pub mod orchestrator;
pub mod query;
pub mod records;
pub mod store;
pub mod types;

use std::sync::Arc;

pub use adapters::SourceAdapter;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use navigation::{NavigationCatalog, NavigationEntry};
pub use orchestrator::SearchService;
pub use store::{Collection, DocumentStore, MemoryStore};
pub use types::{ResultType, SearchRequest, SearchResponse, SearchResult};

/// Run a single search over `store` with the default navigation catalog.
///
/// Convenience wrapper that builds a throwaway [`SearchService`]. Long-lived
/// callers should build one service and reuse it.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid, or whatever
/// [`SearchService::search`] returns.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> qbank_search::Result<()> {
/// use std::sync::Arc;
///
/// let store = Arc::new(qbank_search::MemoryStore::new());
/// let request = qbank_search::SearchRequest::new("calculus");
/// let response =
///     qbank_search::search(store, &request, &qbank_search::SearchConfig::default()).await?;
/// for result in &response.results {
///     println!("{}: {}", result.result_type, result.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    store: Arc<dyn DocumentStore>,
    request: &SearchRequest,
    config: &SearchConfig,
) -> Result<SearchResponse> {
    let service = SearchService::new(
        store,
        Arc::new(NavigationCatalog::default()),
        config.clone(),
    )?;
    service.search(request).await
}
