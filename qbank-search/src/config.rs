//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls result limits, the short-query threshold,
//! per-source caps and the per-adapter deadline.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::ResultType;

/// Hard ceiling on the result limit; `max_limit` may lower it, never raise it.
pub const LIMIT_CEILING: usize = 300;

/// Configuration for the federated search pipeline.
///
/// Use [`Default::default()`] for the production values, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Limit applied when the caller does not send one.
    pub default_limit: usize,
    /// Upper clamp for the requested limit.
    pub max_limit: usize,
    /// Queries with fewer characters (after trimming) skip every adapter.
    pub min_query_chars: usize,
    /// Deadline for a single adapter call in milliseconds.
    pub adapter_timeout_ms: u64,
    /// Maximum records fetched from the users collection.
    pub user_cap: usize,
    /// Maximum records fetched from the questions collection.
    pub question_cap: usize,
    /// Maximum records fetched from the courses collection.
    pub course_cap: usize,
    /// Maximum records fetched from the agents collection.
    pub agent_cap: usize,
    /// Maximum records fetched from the audit log collection.
    pub audit_log_cap: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 150,
            max_limit: 300,
            min_query_chars: 2,
            adapter_timeout_ms: 5_000,
            user_cap: 50,
            question_cap: 50,
            course_cap: 30,
            agent_cap: 20,
            audit_log_cap: 30,
        }
    }
}

impl SearchConfig {
    /// Fetch cap for the adapter producing `result_type`.
    ///
    /// Navigation has no store cap; the catalog is fixed-size.
    pub fn cap_for(&self, result_type: ResultType) -> usize {
        match result_type {
            ResultType::User => self.user_cap,
            ResultType::Question => self.question_cap,
            ResultType::Course => self.course_cap,
            ResultType::Agent => self.agent_cap,
            ResultType::SystemLog => self.audit_log_cap,
            ResultType::Navigation => usize::MAX,
        }
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_limit` must be within `1..=LIMIT_CEILING`
    /// - `min_query_chars` must be at least 1, so an empty query never
    ///   reaches the adapters
    /// - `default_limit` must be within `1..=max_limit`
    /// - `adapter_timeout_ms` must be greater than 0
    /// - every per-source cap must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_limit == 0 {
            return Err(SearchError::Config(
                "max_limit must be greater than 0".into(),
            ));
        }
        if self.max_limit > LIMIT_CEILING {
            return Err(SearchError::Config(format!(
                "max_limit must not exceed {LIMIT_CEILING}"
            )));
        }
        if self.min_query_chars == 0 {
            return Err(SearchError::Config(
                "min_query_chars must be at least 1".into(),
            ));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(SearchError::Config(format!(
                "default_limit must be between 1 and max_limit ({})",
                self.max_limit
            )));
        }
        if self.adapter_timeout_ms == 0 {
            return Err(SearchError::Config(
                "adapter_timeout_ms must be greater than 0".into(),
            ));
        }
        for source in ResultType::adapters() {
            if self.cap_for(*source) == 0 {
                return Err(SearchError::Config(format!(
                    "{} cap must be greater than 0",
                    source
                )));
            }
        }
        Ok(())
    }
}
