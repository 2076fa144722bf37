//! HTTP front end for the federated search.
//!
//! ## Endpoints
//!
//! - `GET /search?q=&limit=&type=` runs one search
//! - `GET /health` reports whether the document store is reachable

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use qbank_search::{SearchRequest, SearchResponse, SearchService};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::num::IntErrorKind;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{Instrument, info};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{Result, ServiceError};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Query string of `GET /search`.
///
/// `limit` is taken as text so a malformed value falls back to the default
/// limit instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Free-text query.
    #[serde(default)]
    pub q: Option<String>,
    /// Requested result count, clamped to `1..=max_limit`.
    #[serde(default)]
    pub limit: Option<String>,
    /// Restrict adapters to one result type.
    #[serde(default, rename = "type")]
    pub result_type: Option<String>,
}

impl SearchParams {
    /// Convert into a core [`SearchRequest`].
    pub fn into_request(self) -> SearchRequest {
        SearchRequest {
            query: self.q.unwrap_or_default(),
            result_type: self.result_type,
            limit: self.limit.as_deref().and_then(parse_limit),
        }
    }
}

/// Error body for non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}

/// Parse a `limit` value. Integers too large for `i64` saturate so they
/// still clamp to the maximum; anything that is not an integer is absent.
fn parse_limit(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(limit) => Some(limit),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

// ---------------------------------------------------------------------------
// SearchServer
// ---------------------------------------------------------------------------

/// HTTP server wrapping a shared [`SearchService`].
pub struct SearchServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

/// Build the router over `service`.
pub fn router(service: SearchService) -> Router {
    Router::new()
        .route("/search", get(handle_search))
        .route("/health", get(handle_health))
        .with_state(service)
}

impl SearchServer {
    /// Start the search HTTP server.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(service: SearchService, config: &ServerConfig) -> Result<Self> {
        let app = router(service);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ServiceError::Server(format!("bind to {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| ServiceError::Server(format!("failed to get local addr: {e}")))?;

        info!("search server listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("search server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for SearchServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /search` runs one federated search.
async fn handle_search(
    State(service): State<SearchService>,
    Query(params): Query<SearchParams>,
) -> Response {
    let span = tracing::info_span!("search", request_id = %Uuid::new_v4());
    let request = params.into_request();

    match service.search(&request).instrument(span.clone()).await {
        Ok(response) => {
            span.in_scope(|| {
                tracing::debug!(
                    total_results = response.total_results,
                    search_time_ms = response.search_time_ms,
                    "search served"
                );
            });
            (StatusCode::OK, Json::<SearchResponse>(response)).into_response()
        }
        Err(e) => {
            span.in_scope(|| tracing::error!(error = %e, "search failed"));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Search failed: {e}"))
        }
    }
}

/// `GET /health` pings the store.
async fn handle_health(State(service): State<SearchService>) -> Response {
    match service.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_owned(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn params_map_to_request() {
        let params = SearchParams {
            q: Some("calculus".to_owned()),
            limit: Some(" 20 ".to_owned()),
            result_type: Some("course".to_owned()),
        };
        let request = params.into_request();
        assert_eq!(request.query, "calculus");
        assert_eq!(request.limit, Some(20));
        assert_eq!(request.result_type.as_deref(), Some("course"));
    }

    #[test]
    fn malformed_limit_is_treated_as_absent() {
        for raw in ["", "ten", "1.5", "12abc"] {
            assert_eq!(parse_limit(raw), None, "{raw:?}");
        }
        assert_eq!(parse_limit("-4"), Some(-4));
    }

    #[test]
    fn overflowing_limit_saturates() {
        assert_eq!(parse_limit("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_limit("-99999999999999999999"), Some(i64::MIN));
    }

    #[test]
    fn missing_query_becomes_empty_text() {
        let request = SearchParams::default().into_request();
        assert_eq!(request.query, "");
        assert!(request.limit.is_none());
        assert!(request.result_type.is_none());
    }

    #[test]
    fn params_deserialize_type_key() {
        let params: SearchParams =
            serde_json::from_str(r#"{"q":"heap","type":"question"}"#).unwrap();
        assert_eq!(params.result_type.as_deref(), Some("question"));
        assert!(params.limit.is_none());
    }

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_value(ErrorResponse {
            error: "Search failed: store error: offline".to_owned(),
        })
        .unwrap();
        assert_eq!(json["error"], "Search failed: store error: offline");
    }
}
