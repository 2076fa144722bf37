//! Error types for the qbank-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Query text never appears in error messages.

/// Errors that can occur during a federated search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The backing document store is unavailable or rejected a query.
    #[error("store error: {0}")]
    Store(String),

    /// The query could not be turned into a literal pattern.
    #[error("invalid query: {0}")]
    Query(String),

    /// A single source adapter failed. Absorbed by the orchestrator.
    #[error("adapter error: {0}")]
    Adapter(String),

    /// An adapter did not answer before its deadline.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// A stored document could not be decoded into a known record shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for qbank-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
