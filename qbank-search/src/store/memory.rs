//! In-memory document store.
//!
//! Holds each collection as a vector of JSON documents. Loaded from a JSON
//! seed file in the shape
//! `{"users": [...], "profiles": [...], "questions": [...], ...}`;
//! missing collections are empty.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;

use super::{lookup, Collection, Document, DocumentStore, Filter, Join, Sort, SortOrder};
use crate::error::SearchError;

/// Seed file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Seed {
    users: Vec<Document>,
    profiles: Vec<Document>,
    questions: Vec<Document>,
    courses: Vec<Document>,
    agents: Vec<Document>,
    audit_logs: Vec<Document>,
}

/// A [`DocumentStore`] over documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<Collection, Vec<Document>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of several documents.
    pub fn with_documents(
        mut self,
        collection: Collection,
        documents: impl IntoIterator<Item = Document>,
    ) -> Self {
        self.collections
            .entry(collection)
            .or_default()
            .extend(documents);
        self
    }

    /// Append one document.
    pub fn insert(&mut self, collection: Collection, document: Document) {
        self.collections.entry(collection).or_default().push(document);
    }

    /// Number of documents in `collection`.
    pub fn len(&self, collection: Collection) -> usize {
        self.collections.get(&collection).map_or(0, Vec::len)
    }

    /// Whether every collection is empty.
    pub fn is_empty(&self) -> bool {
        self.collections.values().all(Vec::is_empty)
    }

    /// Parse a JSON seed document.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Decode`] if the JSON is malformed or a
    /// collection is not an array.
    pub fn from_seed_str(json: &str) -> Result<Self, SearchError> {
        let seed: Seed =
            serde_json::from_str(json).map_err(|e| SearchError::Decode(format!("seed: {e}")))?;
        Ok(Self::new()
            .with_documents(Collection::Users, seed.users)
            .with_documents(Collection::Profiles, seed.profiles)
            .with_documents(Collection::Questions, seed.questions)
            .with_documents(Collection::Courses, seed.courses)
            .with_documents(Collection::Agents, seed.agents)
            .with_documents(Collection::AuditLogs, seed.audit_logs))
    }

    /// Load a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Store`] if the file cannot be read, or
    /// [`SearchError::Decode`] if it cannot be parsed.
    pub fn from_seed_file(path: &Path) -> Result<Self, SearchError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Store(format!("cannot read {}: {e}", path.display())))?;
        Self::from_seed_str(&content)
    }

    fn documents(&self, collection: Collection) -> &[Document] {
        self.collections
            .get(&collection)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Index the join's foreign collection by its key field.
    fn join_index(&self, join: &Join) -> HashMap<String, &Document> {
        let mut index = HashMap::new();
        for doc in self.documents(join.from) {
            if let Some(key) = lookup(doc, join.foreign_field).and_then(join_key) {
                index.entry(key).or_insert(doc);
            }
        }
        index
    }
}

/// Render a join key. Strings and numbers join; `"7"` and `7` are equal.
fn join_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A sort key classified so that every pair of keys compares consistently.
///
/// Keys order by class first (timestamps, numbers, other text, anything
/// else) and only then by value, so mixed columns still sort totally.
#[derive(Debug)]
enum SortKey {
    Time(DateTime<FixedOffset>),
    Number(f64),
    Text(String),
    Other(String),
}

impl SortKey {
    fn of(value: &Value) -> Self {
        match value {
            Value::String(s) => match parse_time(s) {
                Some(time) => Self::Time(time),
                None => Self::Text(s.clone()),
            },
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Self::Other(n.to_string()), Self::Number),
            other => Self::Other(other.to_string()),
        }
    }

    fn class(&self) -> u8 {
        match self {
            Self::Time(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Other(_) => 3,
        }
    }

    /// Compare two keys of the same class.
    fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Time(x), Self::Time(y)) => x.cmp(y),
            (Self::Number(x), Self::Number(y)) => x.total_cmp(y),
            (Self::Text(x), Self::Text(y)) | (Self::Other(x), Self::Other(y)) => x.cmp(y),
            _ => self.class().cmp(&other.class()),
        }
    }
}

fn parse_time(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

/// Stable sort.
///
/// The requested order applies within a key class; classes always run
/// timestamps, numbers, text, other, and documents without the key go last.
fn sort_documents(documents: &mut [&Document], sort: &Sort) {
    let mut keyed: Vec<(Option<SortKey>, &Document)> = documents
        .iter()
        .map(|doc| (lookup(doc, sort.field).map(SortKey::of), *doc))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(x), Some(y)) => x.class().cmp(&y.class()).then_with(|| match sort.order {
            SortOrder::Ascending => x.cmp_value(y),
            SortOrder::Descending => y.cmp_value(x),
        }),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    for (slot, (_, doc)) in documents.iter_mut().zip(keyed) {
        *slot = doc;
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), SearchError> {
        Ok(())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter<'_>,
        cap: usize,
    ) -> Result<Vec<Document>, SearchError> {
        let mut candidates: Vec<&Document> = self.documents(collection).iter().collect();
        if let Some(sort) = &filter.sort {
            sort_documents(&mut candidates, sort);
        }

        let joined = filter.join.map(|join| (join, self.join_index(&join)));

        let mut hits = Vec::new();
        for doc in candidates {
            if hits.len() >= cap {
                break;
            }
            let doc = match &joined {
                Some((join, index)) => attach(doc, join, index),
                None => doc.clone(),
            };
            if filter.matches(&doc) {
                hits.push(doc);
            }
        }
        tracing::trace!(%collection, count = hits.len(), cap, "memory store find");
        Ok(hits)
    }
}

fn attach(doc: &Document, join: &Join, index: &HashMap<String, &Document>) -> Document {
    let mut doc = doc.clone();
    let foreign = lookup(&doc, join.local_field)
        .and_then(join_key)
        .and_then(|key| index.get(&key))
        .map_or(Value::Null, |found| (*found).clone());
    if let Value::Object(map) = &mut doc {
        map.insert(join.as_field.to_owned(), foreign);
    }
    doc
}
