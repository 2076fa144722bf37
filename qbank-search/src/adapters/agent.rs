//! AI agent definitions.

use super::{decode_records, SourceAdapter};
use crate::enrich::preview;
use crate::error::SearchError;
use crate::query::Pattern;
use crate::records::{AgentRecord, SourceRecord};
use crate::store::{Collection, DocumentStore, Filter};
use crate::types::{ResultType, SearchResult};

const FIELDS: &[&str] = &["name", "display_name", "description", "system_prompt"];

/// Searches the agents collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentAdapter;

impl SourceAdapter for AgentAdapter {
    async fn search(
        &self,
        store: &dyn DocumentStore,
        pattern: &Pattern,
        cap: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let filter = Filter::any_of(pattern, FIELDS);
        let documents = store.find(Collection::Agents, &filter, cap).await?;

        let records = decode_records(ResultType::Agent, documents, |record| match record {
            SourceRecord::Agent(agent) => Some(agent),
            _ => None,
        });
        Ok(records.into_iter().map(to_result).collect())
    }
}

fn to_result(agent: AgentRecord) -> SearchResult {
    let title = agent
        .display_name
        .clone()
        .or_else(|| agent.name.clone())
        .unwrap_or_else(|| format!("Agent {}", agent.id));
    // System prompts are searchable but never echoed back.
    let description = agent
        .description
        .as_deref()
        .map_or_else(|| "AI agent".to_owned(), preview);

    SearchResult::new(format!("agent-{}", agent.id), title, description, ResultType::Agent)
        .with_url(format!("/agents/{}", urlencoding::encode(&agent.id)))
        .with_meta("name", agent.name)
        .with_meta("displayName", agent.display_name)
        .with_meta("isActive", agent.is_active)
}
