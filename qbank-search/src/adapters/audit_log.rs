//! Admin audit log entries, newest first.

use super::{decode_records, SourceAdapter};
use crate::error::SearchError;
use crate::query::Pattern;
use crate::records::{AuditLogRecord, SourceRecord};
use crate::store::{Collection, DocumentStore, Filter, SortOrder};
use crate::types::{ResultType, SearchResult};

const FIELDS: &[&str] = &[
    "admin_name",
    "admin_email",
    "description",
    "resource_type",
    "action",
    "method",
    "endpoint",
];

/// Searches the audit log collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLogAdapter;

impl SourceAdapter for AuditLogAdapter {
    async fn search(
        &self,
        store: &dyn DocumentStore,
        pattern: &Pattern,
        cap: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let filter = Filter::any_of(pattern, FIELDS).sorted_by("created_at", SortOrder::Descending);
        let documents = store.find(Collection::AuditLogs, &filter, cap).await?;

        let records = decode_records(ResultType::SystemLog, documents, |record| match record {
            SourceRecord::AuditLog(entry) => Some(entry),
            _ => None,
        });
        Ok(records.into_iter().map(to_result).collect())
    }
}

fn to_result(entry: AuditLogRecord) -> SearchResult {
    let title = match (&entry.action, &entry.resource_type) {
        (Some(action), Some(resource)) => format!("{} {resource}", action.to_uppercase()),
        (Some(action), None) => action.to_uppercase(),
        (None, Some(resource)) => resource.clone(),
        (None, None) => "Audit log entry".to_owned(),
    };
    let request_line = match (&entry.method, &entry.endpoint) {
        (Some(method), Some(endpoint)) => Some(format!("{method} {endpoint}")),
        _ => None,
    };
    let actor = entry.admin_name.as_ref().or(entry.admin_email.as_ref());
    let description = match (&entry.description, actor) {
        (Some(text), Some(actor)) => format!("{text} (by {actor})"),
        (Some(text), None) => text.clone(),
        (None, _) => request_line
            .clone()
            .unwrap_or_else(|| "System activity".to_owned()),
    };

    SearchResult::new(format!("log-{}", entry.id), title, description, ResultType::SystemLog)
        .with_url(format!("/admin/audit-logs/{}", urlencoding::encode(&entry.id)))
        .with_meta("adminName", entry.admin_name)
        .with_meta("adminEmail", entry.admin_email)
        .with_meta("action", entry.action)
        .with_meta("resourceType", entry.resource_type)
        .with_meta("request", request_line)
        .with_meta("createdAt", entry.created_at)
}
