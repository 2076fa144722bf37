//! qbank: global search service for the question bank.
//!
//! Wraps the [`qbank_search`] core in an HTTP service:
//! Query string → normalizer → concurrent source adapters → ranker → JSON
//!
//! # Architecture
//!
//! - **Config**: TOML file with `[server]`, `[store]` and `[search]` sections
//! - **Store**: in-memory document store loaded from a JSON seed
//! - **Server**: `axum` router serving `GET /search` and `GET /health`

pub mod config;
pub mod error;
pub mod server;

use std::sync::Arc;

use qbank_search::{DocumentStore, MemoryStore, NavigationCatalog, SearchService};

pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use server::SearchServer;

/// Build the document store described by `config.store`.
///
/// # Errors
///
/// Returns [`ServiceError::Store`] if the seed file cannot be loaded.
pub fn load_store(config: &ServiceConfig) -> Result<MemoryStore> {
    let Some(path) = &config.store.seed_path else {
        tracing::warn!("no seed_path configured, starting with an empty store");
        return Ok(MemoryStore::new());
    };
    let store = MemoryStore::from_seed_file(path)
        .map_err(|e| ServiceError::Store(format!("failed to load {}: {e}", path.display())))?;
    tracing::info!(seed = %path.display(), "document store loaded");
    Ok(store)
}

/// Build a [`SearchService`] from configuration.
///
/// # Errors
///
/// Returns an error if the store cannot be loaded or the search settings
/// are invalid.
pub fn build_service(config: &ServiceConfig) -> Result<SearchService> {
    let store: Arc<dyn DocumentStore> = Arc::new(load_store(config)?);
    let service = SearchService::new(
        store,
        Arc::new(NavigationCatalog::default()),
        config.search.clone(),
    )?;
    Ok(service)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn missing_seed_path_gives_empty_store() {
        let store = load_store(&ServiceConfig::default()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn unreadable_seed_is_a_store_error() {
        let mut config = ServiceConfig::default();
        config.store.seed_path = Some("/nonexistent/seed.json".into());
        assert!(matches!(load_store(&config), Err(ServiceError::Store(_))));
    }

    #[test]
    fn invalid_search_settings_are_rejected() {
        let mut config = ServiceConfig::default();
        config.search.adapter_timeout_ms = 0;
        assert!(matches!(
            build_service(&config),
            Err(ServiceError::Search(_))
        ));
    }
}
