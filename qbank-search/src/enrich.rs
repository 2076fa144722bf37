//! Question metadata enrichment.
//!
//! Derives the 3-character term code from free-text semester labels,
//! tags which field a query matched, and builds the question deep link.
//!
//! Term inference is a best-effort heuristic over text that is not
//! validated at write time. Labels in a shape it does not anticipate
//! (e.g. "Trimester 2 / 24") fall back to [`FALLBACK_TERM_CODE`] rather
//! than being guessed at.

use std::sync::LazyLock;

use regex::Regex;

use crate::query::Pattern;

/// Term code used when no year can be found in the semester label.
pub const FALLBACK_TERM_CODE: &str = "241";

/// Maximum characters of matched text shown in a preview.
pub const PREVIEW_CHARS: usize = 120;

/// Description used when neither the text nor the description matched
/// and the question has no course title.
pub const PLACEHOLDER_DESCRIPTION: &str = "Question from the question bank";

static EXPLICIT_CODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{3})\b").ok());
static YEAR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b([0-9]{4})\b").ok());

/// Season keywords and their term digit, checked in order.
const SEASONS: &[(&str, char)] = &[("fall", '1'), ("spring", '2'), ("summer", '3')];

/// Season digit used when a year is present but no season keyword is.
const DEFAULT_SEASON: char = '1';

/// Derive the `{YY}{season}` term code from a semester label.
///
/// 1. A standalone 3-digit token (`"Trimester 233"`) is used as-is.
/// 2. Otherwise a 4-digit year plus a season keyword forms the code
///    (`"Spring 2023"` → `"232"`); the season defaults to fall.
/// 3. Otherwise [`FALLBACK_TERM_CODE`].
///
/// This is a best-effort heuristic over unvalidated free text. Known
/// misreadings:
///
/// - tokens must stand alone, so a year glued to a word (`"Spring2023"`)
///   is not seen and the fallback applies
/// - any standalone 3-digit number wins, including unrelated ones such as
///   a section number (`"Fall-2024/Sec 101"` → `"101"`)
pub fn derive_term_code(semester_term: Option<&str>) -> String {
    let Some(text) = semester_term else {
        return FALLBACK_TERM_CODE.to_owned();
    };

    if let Some(code) = capture(&EXPLICIT_CODE, text) {
        return code.to_owned();
    }

    let Some(year) = capture(&YEAR, text) else {
        return FALLBACK_TERM_CODE.to_owned();
    };

    let lower = text.to_lowercase();
    let season = SEASONS
        .iter()
        .find(|(keyword, _)| lower.contains(*keyword))
        .map_or(DEFAULT_SEASON, |(_, digit)| *digit);

    let mut code: String = year[year.len() - 2..].to_owned();
    code.push(season);
    code
}

fn capture<'t>(regex: &LazyLock<Option<Regex>>, text: &'t str) -> Option<&'t str> {
    (**regex)
        .as_ref()?
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Normalize a free-text exam type to the `final`/`mid` path segment.
pub fn exam_segment(exam_type: Option<&str>) -> &'static str {
    match exam_type {
        Some(kind) if kind.to_lowercase().contains("final") => "final",
        _ => "mid",
    }
}

/// Build the question deep link.
pub fn question_url(course_code: &str, exam_type: Option<&str>, term_code: &str) -> String {
    format!(
        "/question-bank/{}/{}/trimester/{}",
        urlencoding::encode(course_code),
        exam_segment(exam_type),
        term_code
    )
}

/// Which question field a query matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedField {
    QuestionText,
    Description,
}

impl MatchedField {
    /// The bracketed tag shown in front of the preview.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::QuestionText => "[QUESTION]",
            Self::Description => "[DESCRIPTION]",
        }
    }

    /// Metadata value for clients.
    pub fn name(&self) -> &'static str {
        match self {
            Self::QuestionText => "question_text",
            Self::Description => "description_content",
        }
    }
}

/// The display description for a question hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPreview {
    /// `None` when the hit came from a field other than text/description.
    pub field: Option<MatchedField>,
    pub description: String,
}

/// Tag the first of question text, then description, containing the query.
///
/// Falls back to the course title, then [`PLACEHOLDER_DESCRIPTION`].
pub fn match_preview(
    pattern: &Pattern,
    question_text: Option<&str>,
    description: Option<&str>,
    course_title: Option<&str>,
) -> MatchPreview {
    let candidates = [
        (MatchedField::QuestionText, question_text),
        (MatchedField::Description, description),
    ];
    for (field, text) in candidates {
        if let Some(text) = text.filter(|t| pattern.is_match(t)) {
            return MatchPreview {
                field: Some(field),
                description: format!("{} {}", field.tag(), preview(text)),
            };
        }
    }

    MatchPreview {
        field: None,
        description: course_title.unwrap_or(PLACEHOLDER_DESCRIPTION).to_owned(),
    }
}

/// Cap `text` at [`PREVIEW_CHARS`] characters, appending `...` if cut.
pub fn preview(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}
