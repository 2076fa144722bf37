//! Course catalogue entries.

use super::{decode_records, SourceAdapter};
use crate::error::SearchError;
use crate::query::Pattern;
use crate::records::{CourseRecord, SourceRecord};
use crate::store::{Collection, DocumentStore, Filter};
use crate::types::{ResultType, SearchResult};

const FIELDS: &[&str] = &["code", "title", "department"];

/// Searches the courses collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseAdapter;

impl SourceAdapter for CourseAdapter {
    async fn search(
        &self,
        store: &dyn DocumentStore,
        pattern: &Pattern,
        cap: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let filter = Filter::any_of(pattern, FIELDS);
        let documents = store.find(Collection::Courses, &filter, cap).await?;

        let records = decode_records(ResultType::Course, documents, |record| match record {
            SourceRecord::Course(course) => Some(course),
            _ => None,
        });
        Ok(records.into_iter().map(to_result).collect())
    }
}

fn to_result(course: CourseRecord) -> SearchResult {
    let title = match (&course.code, &course.title) {
        (Some(code), Some(title)) => format!("{code}: {title}"),
        (Some(only), None) | (None, Some(only)) => only.clone(),
        (None, None) => format!("Course {}", course.id),
    };
    let description = course
        .department
        .as_deref()
        .map_or_else(|| "Course".to_owned(), |dept| format!("Department of {dept}"));
    let slug = course.code.as_deref().unwrap_or(&course.id);

    SearchResult::new(format!("course-{}", course.id), title, description, ResultType::Course)
        .with_url(format!("/courses/{}", urlencoding::encode(slug)))
        .with_meta("code", course.code.clone())
        .with_meta("title", course.title.clone())
        .with_meta("department", course.department.clone())
}
