//! Document store seam.
//!
//! Adapters never touch a concrete backend. They describe a multi-field OR
//! predicate as a [`Filter`] and hand it to a [`DocumentStore`], which
//! applies the pattern, the optional join and sort, and stops scanning once
//! `cap` matches have been collected.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::SearchError;
use crate::query::Pattern;

pub use memory::MemoryStore;

/// A schema-less stored document.
pub type Document = Value;

/// The collections the search reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Profiles,
    Questions,
    Courses,
    Agents,
    AuditLogs,
}

impl Collection {
    /// Returns the collection's stored name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Profiles => "profiles",
            Self::Questions => "questions",
            Self::Courses => "courses",
            Self::Agents => "agents",
            Self::AuditLogs => "audit_logs",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attach the first document of another collection whose `foreign_field`
/// equals this document's `local_field`, under the key `as_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Join {
    pub from: Collection,
    pub local_field: &'static str,
    pub foreign_field: &'static str,
    pub as_field: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Order applied before matching, so the cap keeps the first `cap` hits in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
    pub order: SortOrder,
}

/// A multi-field OR predicate: a document matches when any of `fields`
/// (dotted paths, resolved after the join) matches `pattern`.
#[derive(Debug, Clone)]
pub struct Filter<'a> {
    pub pattern: &'a Pattern,
    pub fields: &'static [&'static str],
    pub join: Option<Join>,
    pub sort: Option<Sort>,
}

impl<'a> Filter<'a> {
    /// OR over `fields` with no join and store order.
    pub fn any_of(pattern: &'a Pattern, fields: &'static [&'static str]) -> Self {
        Self {
            pattern,
            fields,
            join: None,
            sort: None,
        }
    }

    pub fn with_join(mut self, join: Join) -> Self {
        self.join = Some(join);
        self
    }

    pub fn sorted_by(mut self, field: &'static str, order: SortOrder) -> Self {
        self.sort = Some(Sort { field, order });
        self
    }

    /// Whether `document` (already joined) satisfies the predicate.
    pub fn matches(&self, document: &Document) -> bool {
        self.fields.iter().any(|path| {
            lookup(document, path).is_some_and(|value| self.pattern.matches_value(value))
        })
    }
}

/// Resolve a dotted path such as `profile.full_name`.
pub fn lookup<'d>(document: &'d Document, path: &str) -> Option<&'d Value> {
    path.split('.')
        .try_fold(document, |current, key| current.get(key))
        .filter(|value| !value.is_null())
}

/// A read-only document store queried by the source adapters.
///
/// Implementations must be `Send + Sync`; adapters share one store and
/// query it concurrently.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check that the store is reachable. A failure here aborts the whole
    /// search; every later per-collection failure is absorbed.
    async fn ping(&self) -> Result<(), SearchError>;

    /// Return at most `cap` documents of `collection` matching `filter`.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter<'_>,
        cap: usize,
    ) -> Result<Vec<Document>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_resolves_dotted_paths() {
        let doc = json!({"email": "a@x.edu", "profile": {"full_name": "Ada", "phone": null}});
        assert_eq!(lookup(&doc, "email"), Some(&json!("a@x.edu")));
        assert_eq!(lookup(&doc, "profile.full_name"), Some(&json!("Ada")));
        assert_eq!(lookup(&doc, "profile.phone"), None);
        assert_eq!(lookup(&doc, "profile.missing"), None);
        assert_eq!(lookup(&doc, "email.deeper"), None);
    }

    #[test]
    fn filter_matches_any_field() {
        let pattern = Pattern::literal("ada").expect("pattern");
        let filter = Filter::any_of(&pattern, &["email", "profile.full_name"]);
        assert!(filter.matches(&json!({"email": "x@y", "profile": {"full_name": "ADA L"}})));
        assert!(filter.matches(&json!({"email": "ada@y"})));
        assert!(!filter.matches(&json!({"email": "x@y", "name": "ada"})));
    }

    #[test]
    fn collection_names() {
        assert_eq!(Collection::AuditLogs.to_string(), "audit_logs");
        assert_eq!(Collection::Profiles.name(), "profiles");
    }
}
