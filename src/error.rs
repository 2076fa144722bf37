//! Error types for the qbank search service.

use qbank_search::SearchError;

/// Top-level error type for the search service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document store could not be loaded or reached.
    #[error("store error: {0}")]
    Store(String),

    /// HTTP server error.
    #[error("server error: {0}")]
    Server(String),

    /// Error raised by the search core.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn display_prefixes() {
        assert_eq!(
            ServiceError::Config("bad port".into()).to_string(),
            "config error: bad port"
        );
        assert_eq!(
            ServiceError::Server("bind failed".into()).to_string(),
            "server error: bind failed"
        );
    }

    #[test]
    fn search_errors_pass_through() {
        let err: ServiceError = SearchError::Store("offline".into()).into();
        assert_eq!(err.to_string(), "store error: offline");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ServiceError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
