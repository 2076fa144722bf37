//! Query normalization: trimming, short-query detection, literal pattern
//! construction, type scoping and limit clamping.

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{ResultType, SearchRequest};

/// A case-insensitive literal substring matcher.
///
/// Every regex metacharacter in the source text is escaped, so `a.b*`
/// matches only the four characters `a`, `.`, `b`, `*` in sequence.
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    regex: Regex,
}

impl Pattern {
    /// Build a literal pattern for `text`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Query`] if the escaped pattern exceeds the
    /// regex engine's size limits.
    pub fn literal(text: &str) -> Result<Self, SearchError> {
        let regex = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::Query(e.to_string()))?;
        Ok(Self {
            text: text.to_owned(),
            regex,
        })
    }

    /// The unescaped text this pattern was built from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether `haystack` contains the pattern text, ignoring case.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Match against a loosely-typed document field.
    ///
    /// Strings match directly; numbers and booleans match on their
    /// decimal/text rendering. Arrays match if any element matches.
    /// Objects and nulls never match.
    pub fn matches_value(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => self.is_match(s),
            Value::Number(n) => self.is_match(&n.to_string()),
            Value::Bool(b) => self.is_match(if *b { "true" } else { "false" }),
            Value::Array(items) => items.iter().any(|item| self.matches_value(item)),
            Value::Null | Value::Object(_) => false,
        }
    }
}

/// Which store-backed adapters a search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// No `type` given: every adapter runs.
    All,
    /// Exactly one type requested. `Only(Navigation)` runs no adapters.
    Only(ResultType),
    /// A `type` that names nothing known: no adapters run.
    Unknown,
}

impl Scope {
    /// Parse the optional `type` parameter. Empty and absent are the same.
    pub fn parse(result_type: Option<&str>) -> Self {
        match result_type.map(str::trim) {
            None | Some("") => Self::All,
            Some(name) => ResultType::from_name(name).map_or(Self::Unknown, Self::Only),
        }
    }

    /// Whether the adapter for `source` runs under this scope.
    pub fn includes(&self, source: ResultType) -> bool {
        match self {
            Self::All => source.is_adapter(),
            Self::Only(only) => *only == source && source.is_adapter(),
            Self::Unknown => false,
        }
    }

    /// The adapters to run, in fixed concatenation order.
    pub fn sources(&self) -> Vec<ResultType> {
        ResultType::adapters()
            .iter()
            .copied()
            .filter(|source| self.includes(*source))
            .collect()
    }
}

/// A validated query ready for fan-out.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// The trimmed query text. Ranking tests titles against this.
    pub raw_text: String,
    /// The escaped, case-insensitive pattern handed to adapters.
    pub pattern: Pattern,
    /// Adapter scoping from the `type` parameter.
    pub scope: Scope,
    /// Clamped result limit.
    pub limit: usize,
}

/// Outcome of normalizing a [`SearchRequest`].
#[derive(Debug, Clone)]
pub enum Normalized {
    /// The trimmed query is below the minimum length; only the full
    /// navigation catalog is returned.
    TooShort,
    /// The query is long enough to search.
    Ready(SearchQuery),
}

/// Clamp a requested limit into `1..=config.max_limit`.
///
/// Absent limits take `config.default_limit`.
pub fn clamp_limit(requested: Option<i64>, config: &SearchConfig) -> usize {
    let max = i64::try_from(config.max_limit).unwrap_or(i64::MAX);
    match requested {
        None => config.default_limit.min(config.max_limit).max(1),
        Some(n) => usize::try_from(n.clamp(1, max)).unwrap_or(1),
    }
}

/// Normalize a raw request.
///
/// # Errors
///
/// Returns [`SearchError::Query`] if no pattern can be built from the text.
pub fn normalize(request: &SearchRequest, config: &SearchConfig) -> Result<Normalized, SearchError> {
    let trimmed = request.query.trim();
    if trimmed.chars().count() < config.min_query_chars {
        return Ok(Normalized::TooShort);
    }

    Ok(Normalized::Ready(SearchQuery {
        raw_text: trimmed.to_owned(),
        pattern: Pattern::literal(trimmed)?,
        scope: Scope::parse(request.result_type.as_deref()),
        limit: clamp_limit(request.limit, config),
    }))
}
