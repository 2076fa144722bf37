//! Question bank entries, enriched with term codes and match previews.

use std::fmt::Write as _;

use super::{decode_records, SourceAdapter};
use crate::enrich::{derive_term_code, match_preview, question_url};
use crate::error::SearchError;
use crate::query::Pattern;
use crate::records::{QuestionRecord, SourceRecord};
use crate::store::{Collection, DocumentStore, Filter};
use crate::types::{ResultType, SearchResult};

const FIELDS: &[&str] = &[
    "question_text",
    "course_title",
    "course_code",
    "semester_term",
    "exam_type",
    "description_content",
    "short_name",
    "question_number",
    "sub_question",
];

/// Searches the questions collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionAdapter;

impl SourceAdapter for QuestionAdapter {
    async fn search(
        &self,
        store: &dyn DocumentStore,
        pattern: &Pattern,
        cap: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let filter = Filter::any_of(pattern, FIELDS);
        let documents = store.find(Collection::Questions, &filter, cap).await?;

        let records = decode_records(ResultType::Question, documents, |record| match record {
            SourceRecord::Question(question) => Some(question),
            _ => None,
        });
        Ok(records
            .into_iter()
            .filter_map(|question| to_result(question, pattern))
            .collect())
    }
}

/// Map one question, or drop it when it has no stable identity.
///
/// The deep link needs the course code and the title needs the question
/// number; a record missing either is never shown.
fn to_result(question: QuestionRecord, pattern: &Pattern) -> Option<SearchResult> {
    let (Some(course_code), Some(number)) = (
        question.course_code.as_deref(),
        question.question_number.as_deref(),
    ) else {
        tracing::trace!(id = %question.id, "dropping question without course code or number");
        return None;
    };

    let term_code = derive_term_code(question.semester_term.as_deref());
    let url = question_url(course_code, question.exam_type.as_deref(), &term_code);
    let preview = match_preview(
        pattern,
        question.question_text.as_deref(),
        question.description_content.as_deref(),
        question.course_title.as_deref(),
    );

    let mut title = format!("{course_code} Q{number}");
    if let Some(sub) = &question.sub_question {
        // Writing to a String cannot fail.
        let _ = write!(title, "({sub})");
    }
    if let Some(course_title) = &question.course_title {
        title.push_str(" · ");
        title.push_str(course_title);
    }

    Some(
        SearchResult::new(
            format!("question-{}", question.id),
            title,
            preview.description,
            ResultType::Question,
        )
        .with_url(url)
        .with_meta("courseCode", Some(course_code))
        .with_meta("courseTitle", question.course_title.clone())
        .with_meta("questionNumber", Some(number))
        .with_meta("subQuestion", question.sub_question.clone())
        .with_meta("examType", question.exam_type.clone())
        .with_meta("semesterTerm", question.semester_term.clone())
        .with_meta("termCode", Some(term_code))
        .with_meta("shortName", question.short_name.clone())
        .with_meta("matchedField", preview.field.map(|f| f.name())),
    )
}
