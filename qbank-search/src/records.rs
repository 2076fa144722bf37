//! Typed record shapes decoded from schema-less store documents.
//!
//! Each adapter decodes its documents at the boundary into one variant of
//! [`SourceRecord`]. Fields that real data stores inconsistently as strings
//! or numbers (question numbers, student ids, batches, phone numbers) are
//! accepted in either form and held as strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SearchError;
use crate::store::Document;
use crate::types::ResultType;

/// Accept a string, number or boolean and keep it as a trimmed string.
/// Empty strings and nulls become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s.trim().to_owned()).filter(|s| !s.is_empty()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Like [`lenient_string`] but the field is mandatory.
fn required_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer)?.ok_or_else(|| serde::de::Error::custom("empty identifier"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub student_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub department: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub batch: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub program: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: Option<String>,
}

/// A user account with its joined profile (if any).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    #[serde(deserialize_with = "required_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,
    #[serde(default)]
    pub profile: Option<ProfileRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    #[serde(deserialize_with = "required_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub question_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub semester_term: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub exam_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description_content: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub question_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sub_question: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseRecord {
    #[serde(deserialize_with = "required_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentRecord {
    #[serde(deserialize_with = "required_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuditLogRecord {
    #[serde(deserialize_with = "required_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub admin_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub admin_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resource_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub endpoint: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

/// One decoded document, tagged by the source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRecord {
    User(UserRecord),
    Question(QuestionRecord),
    Course(CourseRecord),
    Agent(AgentRecord),
    AuditLog(AuditLogRecord),
}

impl SourceRecord {
    /// Decode `document` as the record shape produced by `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Decode`] when the document is not an object of
    /// the expected shape (e.g. missing `id`), or `source` is navigation.
    pub fn decode(source: ResultType, document: Document) -> Result<Self, SearchError> {
        fn from<T: for<'de> Deserialize<'de>>(document: Document) -> Result<T, SearchError> {
            serde_json::from_value(document).map_err(|e| SearchError::Decode(e.to_string()))
        }

        Ok(match source {
            ResultType::User => Self::User(from(document)?),
            ResultType::Question => Self::Question(from(document)?),
            ResultType::Course => Self::Course(from(document)?),
            ResultType::Agent => Self::Agent(from(document)?),
            ResultType::SystemLog => Self::AuditLog(from(document)?),
            ResultType::Navigation => {
                return Err(SearchError::Decode(
                    "navigation entries are not stored".into(),
                ))
            }
        })
    }
}
