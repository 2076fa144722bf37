//! Integration tests for the search HTTP server.
//!
//! Each test starts a server on an auto-assigned port and drives it with
//! `reqwest`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use async_trait::async_trait;
use qbank::config::{ServerConfig, StoreConfig};
use qbank::{SearchServer, ServiceConfig, build_service};
use qbank_search::store::{Document, Filter};
use qbank_search::{
    Collection, DocumentStore, NavigationCatalog, SearchConfig, SearchError, SearchService,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

fn seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("seed.json")
}

fn ephemeral() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        port: 0,
    }
}

async fn start_seeded() -> SearchServer {
    let config = ServiceConfig {
        server: ephemeral(),
        store: StoreConfig {
            seed_path: Some(seed_path()),
        },
        search: SearchConfig::default(),
    };
    let service = build_service(&config).expect("service");
    SearchServer::start(service, &config.server)
        .await
        .expect("server start")
}

async fn get_search(server: &SearchServer, params: &[(&str, &str)]) -> (u16, Value) {
    let response = reqwest::Client::new()
        .get(format!("http://{}/search", server.addr()))
        .query(params)
        .send()
        .await
        .expect("request");
    let status = response.status().as_u16();
    (status, response.json().await.expect("json body"))
}

fn ids(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|r| r["id"].as_str().unwrap_or_default().to_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok() {
    let server = start_seeded().await;
    let response = reqwest::get(format!("http://{}/health", server.addr()))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let server = start_seeded().await;
    let (status, body) = get_search(&server, &[("q", "calculus")]).await;

    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec!["question-q-3", "course-c-2"]);
    assert_eq!(body["totalResults"], 2);
    assert!(body["searchTime"].is_u64());

    let question = &body["results"][0];
    assert_eq!(question["type"], "question");
    assert_eq!(
        question["url"],
        "/question-bank/MATH%201151/final/trimester/233"
    );
    assert_eq!(question["metadata"]["termCode"], "233");
    assert_eq!(question["relevance"], 1.0);
}

#[tokio::test]
async fn short_query_lists_navigation() {
    let server = start_seeded().await;
    for params in [vec![], vec![("q", "x")]] {
        let (status, body) = get_search(&server, &params).await;
        assert_eq!(status, 200);
        assert_eq!(body["totalResults"], 0);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 12);
        assert!(results.iter().all(|r| r["type"] == "navigation"));
    }
}

#[tokio::test]
async fn query_is_matched_literally() {
    let server = start_seeded().await;
    let (_, body) = get_search(&server, &[("q", "(x+1)^2")]).await;
    assert_eq!(ids(&body), vec!["question-q-3"]);
}

#[tokio::test]
async fn limit_is_clamped_and_lenient() {
    let server = start_seeded().await;

    let (status, body) = get_search(&server, &[("q", "admin"), ("limit", "0")]).await;
    assert_eq!(status, 200);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert!(body["totalResults"].as_u64().unwrap() > 1);

    let (status, body) = get_search(&server, &[("q", "admin"), ("limit", "5000")]).await;
    assert_eq!(status, 200);
    assert_eq!(
        body["results"].as_array().unwrap().len() as u64,
        body["totalResults"].as_u64().unwrap()
    );

    let (status, _) = get_search(&server, &[("q", "admin"), ("limit", "lots")]).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn overflowing_limit_clamps_to_maximum() {
    let server = start_seeded().await;
    let (status, body) =
        get_search(&server, &[("q", "admin"), ("limit", "99999999999999999999")]).await;
    assert_eq!(status, 200);
    assert_eq!(
        body["results"].as_array().unwrap().len() as u64,
        body["totalResults"].as_u64().unwrap()
    );
    assert!(body["totalResults"].as_u64().unwrap() > 1);
}

#[tokio::test]
async fn type_scopes_adapters() {
    let server = start_seeded().await;
    let (status, body) = get_search(&server, &[("q", "data"), ("type", "course")]).await;
    assert_eq!(status, 200);
    assert!(ids(&body).contains(&"course-c-1".to_owned()));
    for result in body["results"].as_array().unwrap() {
        assert!(
            result["type"] == "course" || result["type"] == "navigation",
            "unexpected {result}"
        );
    }
}

#[tokio::test]
async fn system_prompts_are_not_returned() {
    let server = start_seeded().await;
    let (_, body) = get_search(&server, &[("q", "patient")]).await;
    assert_eq!(ids(&body), vec!["agent-a-1"]);
    assert!(!body.to_string().contains("patient data structures tutor"));
}

// ---------------------------------------------------------------------------
// Failure handling
// ---------------------------------------------------------------------------

/// A store whose connection is down.
struct OfflineStore;

#[async_trait]
impl DocumentStore for OfflineStore {
    async fn ping(&self) -> Result<(), SearchError> {
        Err(SearchError::Store("connection refused".into()))
    }

    async fn find(
        &self,
        _collection: Collection,
        _filter: &Filter<'_>,
        _cap: usize,
    ) -> Result<Vec<Document>, SearchError> {
        Err(SearchError::Store("connection refused".into()))
    }
}

/// A store that is up but rejects every query.
struct RejectingStore;

#[async_trait]
impl DocumentStore for RejectingStore {
    async fn ping(&self) -> Result<(), SearchError> {
        Ok(())
    }

    async fn find(
        &self,
        collection: Collection,
        _filter: &Filter<'_>,
        _cap: usize,
    ) -> Result<Vec<Document>, SearchError> {
        Err(SearchError::Store(format!("{collection} query rejected")))
    }
}

async fn start_with(store: impl DocumentStore + 'static) -> SearchServer {
    let service = SearchService::new(
        Arc::new(store),
        Arc::new(NavigationCatalog::default()),
        SearchConfig::default(),
    )
    .unwrap();
    SearchServer::start(service, &ephemeral()).await.unwrap()
}

#[tokio::test]
async fn offline_store_returns_error_body() {
    let server = start_with(OfflineStore).await;

    let (status, body) = get_search(&server, &[("q", "calculus")]).await;
    assert_eq!(status, 500);
    assert_eq!(
        body["error"],
        "Search failed: store error: connection refused"
    );

    let response = reqwest::get(format!("http://{}/health", server.addr()))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 503);
}

#[tokio::test]
async fn failing_adapters_still_answer() {
    let server = start_with(RejectingStore).await;
    let (status, body) = get_search(&server, &[("q", "settings")]).await;
    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec!["nav-settings"]);
}

#[tokio::test]
async fn bind_conflict_is_a_server_error() {
    let first = start_seeded().await;
    let config = ServerConfig {
        host: "127.0.0.1".to_owned(),
        port: first.port(),
    };
    let service = build_service(&ServiceConfig::default()).unwrap();
    let result = SearchServer::start(service, &config).await;
    assert!(matches!(result, Err(qbank::ServiceError::Server(_))));
}
