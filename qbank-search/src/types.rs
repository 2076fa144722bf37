//! Core types for the unified result schema and result type identification.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A single hit in the unified schema, regardless of which source produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifier unique within one response (prefixed per source).
    pub id: String,
    /// Display title. Ranking tests the raw query against this field.
    pub title: String,
    /// One-line description shown under the title.
    pub description: String,
    /// Which kind of record this result represents.
    #[serde(rename = "type")]
    pub result_type: ResultType,
    /// Deep link into the feature page for this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Source fields surfaced for client display.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// 1.0 when the title contains the query, 0.0 otherwise. Set by the ranker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
}

impl SearchResult {
    /// Create a result with empty metadata and no url.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        result_type: ResultType,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            result_type,
            url: None,
            metadata: Map::new(),
            relevance: None,
        }
    }

    /// Attach a deep link.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Insert a metadata entry. `None` values are skipped so the bag only
    /// carries fields the record actually has.
    pub fn with_meta<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.metadata.insert(key.to_owned(), value.into());
        }
        self
    }
}

/// The fixed set of result types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultType {
    /// User accounts joined with their profile.
    User,
    /// Question bank entries.
    Question,
    /// Course catalogue entries.
    Course,
    /// AI agent definitions.
    Agent,
    /// Admin audit log entries.
    SystemLog,
    /// Static links to application features.
    Navigation,
}

impl ResultType {
    /// Returns the wire name of this type (as used in `?type=`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Question => "question",
            Self::Course => "course",
            Self::Agent => "agent",
            Self::SystemLog => "system-log",
            Self::Navigation => "navigation",
        }
    }

    /// Parse a wire name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.name() == name)
    }

    /// Whether a store-backed source adapter produces this type.
    pub fn is_adapter(&self) -> bool {
        !matches!(self, Self::Navigation)
    }

    /// Store-backed types in the fixed concatenation order.
    pub fn adapters() -> &'static [ResultType] {
        &[
            Self::User,
            Self::Question,
            Self::Course,
            Self::Agent,
            Self::SystemLog,
        ]
    }

    /// All result types, navigation last.
    pub fn all() -> &'static [ResultType] {
        &[
            Self::User,
            Self::Question,
            Self::Course,
            Self::Agent,
            Self::SystemLog,
            Self::Navigation,
        ]
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A search as received from the caller, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Raw free-text query.
    pub query: String,
    /// Optional `type` scope. Empty is the same as absent.
    pub result_type: Option<String>,
    /// Requested limit, unclamped.
    pub limit: Option<i64>,
}

impl SearchRequest {
    /// Request for `query` with no scope and the default limit.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Scope the search to one result type.
    pub fn with_type(mut self, result_type: impl Into<String>) -> Self {
        self.result_type = Some(result_type.into());
        self
    }

    /// Set the requested limit.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The assembled response for one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ranked results, at most `limit` of them.
    pub results: Vec<SearchResult>,
    /// Number of results before truncation to `limit`.
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    /// Wall-clock time spent in the pipeline, in milliseconds.
    #[serde(rename = "searchTime")]
    pub search_time_ms: u64,
}
