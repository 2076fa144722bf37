//! User accounts joined with their profile.

use super::{decode_records, join_present, SourceAdapter};
use crate::error::SearchError;
use crate::query::Pattern;
use crate::records::{ProfileRecord, SourceRecord, UserRecord};
use crate::store::{Collection, DocumentStore, Filter, Join};
use crate::types::{ResultType, SearchResult};

/// Account email plus every searchable profile field.
const FIELDS: &[&str] = &[
    "email",
    "profile.email",
    "profile.full_name",
    "profile.student_id",
    "profile.department",
    "profile.batch",
    "profile.program",
    "profile.phone",
];

const PROFILE_JOIN: Join = Join {
    from: Collection::Profiles,
    local_field: "id",
    foreign_field: "user_id",
    as_field: "profile",
};

/// Searches the users collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAdapter;

impl SourceAdapter for UserAdapter {
    async fn search(
        &self,
        store: &dyn DocumentStore,
        pattern: &Pattern,
        cap: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let filter = Filter::any_of(pattern, FIELDS).with_join(PROFILE_JOIN);
        let documents = store.find(Collection::Users, &filter, cap).await?;

        let records = decode_records(ResultType::User, documents, |record| match record {
            SourceRecord::User(user) => Some(user),
            _ => None,
        });
        Ok(records.into_iter().map(to_result).collect())
    }
}

fn to_result(user: UserRecord) -> SearchResult {
    let profile = user.profile.unwrap_or_default();
    let ProfileRecord {
        email: profile_email,
        full_name,
        student_id,
        department,
        batch,
        program,
        phone,
    } = profile;

    let email = user.email.or(profile_email);
    let title = full_name
        .clone()
        .or_else(|| email.clone())
        .unwrap_or_else(|| format!("User {}", user.id));
    let description = join_present(&[
        email.as_deref(),
        user.role.as_deref(),
        department.as_deref(),
        program.as_deref(),
    ]);

    SearchResult::new(format!("user-{}", user.id), title, description, ResultType::User)
        .with_url(format!("/admin/users/{}", urlencoding::encode(&user.id)))
        .with_meta("email", email)
        .with_meta("fullName", full_name)
        .with_meta("role", user.role)
        .with_meta("studentId", student_id)
        .with_meta("department", department)
        .with_meta("batch", batch)
        .with_meta("program", program)
        .with_meta("phone", phone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_documents(
                Collection::Users,
                vec![
                    json!({"id": "u1", "email": "ada@uni.edu", "role": "student"}),
                    json!({"id": "u2", "email": "grace@uni.edu", "role": "teacher"}),
                    json!({"id": "u3", "email": "nobody@uni.edu"}),
                    json!({"email": "no-id@uni.edu"}),
                ],
            )
            .with_documents(
                Collection::Profiles,
                vec![
                    json!({"user_id": "u1", "full_name": "Ada Lovelace", "student_id": 2110042,
                           "department": "CSE", "program": "BSc"}),
                    json!({"user_id": "u2", "full_name": "Grace Hopper", "department": "EEE"}),
                ],
            )
    }

    async fn search(text: &str) -> Vec<SearchResult> {
        let pattern = Pattern::literal(text).expect("pattern");
        UserAdapter
            .search(&store(), &pattern, 50)
            .await
            .expect("search")
    }

    #[tokio::test]
    async fn matches_joined_profile_fields() {
        let results = search("2110042").await;
        assert_eq!(results.len(), 1);
        let ada = &results[0];
        assert_eq!(ada.id, "user-u1");
        assert_eq!(ada.title, "Ada Lovelace");
        assert_eq!(ada.description, "ada@uni.edu · student · CSE · BSc");
        assert_eq!(ada.url.as_deref(), Some("/admin/users/u1"));
        assert_eq!(ada.metadata["studentId"], "2110042");
        assert_eq!(ada.result_type, ResultType::User);
    }

    #[tokio::test]
    async fn matches_account_email() {
        let results = search("nobody@").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "nobody@uni.edu");
    }

    #[tokio::test]
    async fn skips_documents_without_id() {
        let results = search("uni.edu").await;
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["user-u1", "user-u2", "user-u3"]);
    }

    #[tokio::test]
    async fn role_is_not_a_search_field() {
        assert!(search("teacher").await.is_empty());
    }
}
