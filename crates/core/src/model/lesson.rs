use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::exercise::Exercise;
use crate::model::ids::LessonNumber;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson number must be > 0")]
    InvalidNumber,

    #[error("exercise {exercise}: needs at least two options, found {len}")]
    TooFewOptions { exercise: usize, len: usize },

    #[error("exercise {exercise}: correct index {correct} is out of range for {len} options")]
    CorrectOutOfRange {
        exercise: usize,
        correct: usize,
        len: usize,
    },
}

//
// ─── CONTENT ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub korean: String,
    pub romanization: String,
    pub english: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarRule {
    pub title: String,
    pub explanation: String,
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formality_note: Option<String>,
}

/// An example sentence with its reading and translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub korean: String,
    pub romanization: String,
    pub english: String,
}

//
// ─── LESSON ───────────────────────────────────────────────────────────────────
//

/// A fully loaded lesson. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "LessonFile")]
pub struct Lesson {
    number: LessonNumber,
    title: String,
    vocabulary: Vec<VocabEntry>,
    grammar_rules: Vec<GrammarRule>,
    example_sentences: Vec<Example>,
    exercises: Vec<Exercise>,
}

/// On-disk shape of a lesson file.
#[derive(Deserialize)]
struct LessonFile {
    lesson_number: LessonNumber,
    lesson_title: String,
    vocabulary: Vec<VocabEntry>,
    grammar_rules: Vec<GrammarRule>,
    example_sentences: Vec<Example>,
    exercises: Vec<Exercise>,
}

impl TryFrom<LessonFile> for Lesson {
    type Error = LessonError;

    fn try_from(file: LessonFile) -> Result<Self, Self::Error> {
        Lesson::new(
            file.lesson_number,
            file.lesson_title,
            file.vocabulary,
            file.grammar_rules,
            file.example_sentences,
            file.exercises,
        )
    }
}

impl Lesson {
    /// Build a lesson, checking the exercise invariants.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::InvalidNumber` for lesson 0, or the first exercise
    /// whose `correct` index is out of range.
    pub fn new(
        number: LessonNumber,
        title: impl Into<String>,
        vocabulary: Vec<VocabEntry>,
        grammar_rules: Vec<GrammarRule>,
        example_sentences: Vec<Example>,
        exercises: Vec<Exercise>,
    ) -> Result<Self, LessonError> {
        if number.is_none() {
            return Err(LessonError::InvalidNumber);
        }
        for (index, exercise) in exercises.iter().enumerate() {
            exercise.validate(index)?;
        }
        Ok(Self {
            number,
            title: title.into(),
            vocabulary,
            grammar_rules,
            example_sentences,
            exercises,
        })
    }

    #[must_use]
    pub fn number(&self) -> LessonNumber {
        self.number
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn vocabulary(&self) -> &[VocabEntry] {
        &self.vocabulary
    }

    #[must_use]
    pub fn grammar_rules(&self) -> &[GrammarRule] {
        &self.grammar_rules
    }

    #[must_use]
    pub fn example_sentences(&self) -> &[Example] {
        &self.example_sentences
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Header used wherever a lesson is named, e.g. `Lesson 3: Numbers`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Lesson {}: {}", self.number, self.title)
    }

    #[must_use]
    pub fn summary(&self) -> LessonSummary {
        LessonSummary {
            number: self.number,
            title: self.title.clone(),
        }
    }

    #[must_use]
    pub fn overview(&self) -> LessonOverview {
        LessonOverview {
            number: self.number,
            title: self.title.clone(),
            vocabulary_count: self.vocabulary.len(),
            grammar_rule_count: self.grammar_rules.len(),
            example_count: self.example_sentences.len(),
            exercise_count: self.exercises.len(),
        }
    }
}

/// Lightweight listing entry; parsed without the lesson body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSummary {
    #[serde(rename = "lesson_number")]
    pub number: LessonNumber,
    #[serde(rename = "lesson_title")]
    pub title: String,
}

/// Counts shown on a lesson's landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonOverview {
    pub number: LessonNumber,
    pub title: String,
    pub vocabulary_count: usize,
    pub grammar_rule_count: usize,
    pub example_count: usize,
    pub exercise_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON_JSON: &str = r#"{
        "lesson_number": 1,
        "lesson_title": "Greetings",
        "vocabulary": [
            {"korean": "안녕하세요", "romanization": "annyeonghaseyo", "english": "hello"}
        ],
        "grammar_rules": [
            {"title": "Polite ending", "explanation": "Use -요", "pattern": "V + 요"},
            {"title": "Topic", "explanation": "은/는", "pattern": "N + 은/는", "formality_note": "neutral"}
        ],
        "example_sentences": [],
        "exercises": [
            {"type": "multiple_choice", "question": "Hello?", "options": ["안녕하세요", "감사합니다"], "correct": 0, "explanation": "greeting"},
            {"type": "word_building", "question": "Build hello", "syllable_parts": ["안", "녕"], "target": "안녕"}
        ]
    }"#;

    #[test]
    fn parses_lesson_file() {
        let lesson: Lesson = serde_json::from_str(LESSON_JSON).unwrap();
        assert_eq!(lesson.number(), LessonNumber::new(1));
        assert_eq!(lesson.title(), "Greetings");
        assert_eq!(lesson.vocabulary()[0].korean, "안녕하세요");
        assert_eq!(lesson.grammar_rules()[0].formality_note, None);
        assert_eq!(lesson.grammar_rules()[1].formality_note.as_deref(), Some("neutral"));
        assert_eq!(lesson.exercises().len(), 2);
        assert_eq!(lesson.heading(), "Lesson 1: Greetings");

        let overview = lesson.overview();
        assert_eq!(overview.vocabulary_count, 1);
        assert_eq!(overview.grammar_rule_count, 2);
        assert_eq!(overview.example_count, 0);
        assert_eq!(overview.exercise_count, 2);
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let json = LESSON_JSON.replace(r#""correct": 0"#, r#""correct": 5"#);
        let err = serde_json::from_str::<Lesson>(&json).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn requires_all_sections() {
        let json = r#"{"lesson_number": 2, "lesson_title": "x", "vocabulary": []}"#;
        assert!(serde_json::from_str::<Lesson>(json).is_err());
    }

    #[test]
    fn summary_ignores_lesson_body() {
        let summary: LessonSummary = serde_json::from_str(LESSON_JSON).unwrap();
        assert_eq!(summary.number, LessonNumber::new(1));
        assert_eq!(summary.title, "Greetings");
    }

    #[test]
    fn lesson_zero_is_invalid() {
        let err = Lesson::new(LessonNumber::new(0), "x", vec![], vec![], vec![], vec![]).unwrap_err();
        assert_eq!(err, LessonError::InvalidNumber);
    }
}
