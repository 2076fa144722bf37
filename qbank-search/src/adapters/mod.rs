//! Source adapters.
//!
//! Each module provides a struct implementing [`SourceAdapter`] that queries
//! one collection with a multi-field OR filter and maps the decoded records
//! into the unified [`SearchResult`] schema.

pub mod agent;
pub mod audit_log;
pub mod course;
pub mod question;
pub mod user;

pub use agent::AgentAdapter;
pub use audit_log::AuditLogAdapter;
pub use course::CourseAdapter;
pub use question::QuestionAdapter;
pub use user::UserAdapter;

use crate::error::SearchError;
use crate::query::Pattern;
use crate::records::SourceRecord;
use crate::store::{Document, DocumentStore};
use crate::types::{ResultType, SearchResult};

/// A pluggable source backed by one store collection.
///
/// Adapters are stateless. Each handles its own:
///
/// - field set for the OR predicate (and join/sort if it needs one)
/// - decoding of schema-less documents into its record shape
/// - mapping into [`SearchResult`], including the deep link and metadata
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait SourceAdapter: Send + Sync {
    /// Query the store and return at most `cap` mapped results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the store query fails. The orchestrator
    /// absorbs the error and contributes nothing for this source.
    fn search(
        &self,
        store: &dyn DocumentStore,
        pattern: &Pattern,
        cap: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;
}

/// Run the adapter for `source`, dispatching to the concrete implementation.
pub async fn run_adapter(
    source: ResultType,
    store: &dyn DocumentStore,
    pattern: &Pattern,
    cap: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    match source {
        ResultType::User => UserAdapter.search(store, pattern, cap).await,
        ResultType::Question => QuestionAdapter.search(store, pattern, cap).await,
        ResultType::Course => CourseAdapter.search(store, pattern, cap).await,
        ResultType::Agent => AgentAdapter.search(store, pattern, cap).await,
        ResultType::SystemLog => AuditLogAdapter.search(store, pattern, cap).await,
        ResultType::Navigation => Err(SearchError::Adapter(
            "navigation is served from the static catalog".into(),
        )),
    }
}

/// Decode documents into one record shape, skipping any that do not fit.
///
/// A single malformed document never fails the adapter.
fn decode_records<T>(
    source: ResultType,
    documents: Vec<Document>,
    pick: fn(SourceRecord) -> Option<T>,
) -> Vec<T> {
    documents
        .into_iter()
        .filter_map(|doc| match SourceRecord::decode(source, doc) {
            Ok(record) => pick(record),
            Err(err) => {
                tracing::debug!(%source, error = %err, "skipping undecodable document");
                None
            }
        })
        .collect()
}

/// Join the present parts with ` · `.
fn join_present(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(" · ")
}
