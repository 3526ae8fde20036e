use serde::Deserialize;
use serde::de::{Deserializer, Error as DeError};
use thiserror::Error;

use crate::model::lesson::LessonError;

/// Marker a syllable-choice sentence uses for the missing syllable.
pub const SENTENCE_PLACEHOLDER: &str = "___";

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvaluationError {
    #[error("unsupported exercise type: {kind}")]
    UnsupportedExerciseType { kind: String },

    #[error("{exercise} exercise expects a {expected} answer")]
    AnswerMismatch {
        exercise: &'static str,
        expected: &'static str,
    },
}

//
// ─── ANSWERS ──────────────────────────────────────────────────────────────────
//

/// What the learner submitted for the current exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Zero-based index of a chosen option.
    Choice(usize),
    /// Word assembled from syllable buttons.
    Built(String),
}

/// Outcome of checking one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub correct: bool,
    pub message: String,
}

impl AnswerResult {
    fn correct(message: impl Into<String>) -> Self {
        Self {
            correct: true,
            message: message.into(),
        }
    }

    fn incorrect(message: impl Into<String>) -> Self {
        Self {
            correct: false,
            message: message.into(),
        }
    }
}

//
// ─── VARIANTS ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MultipleChoice {
    question: String,
    options: Vec<String>,
    correct: usize,
    explanation: String,
}

impl MultipleChoice {
    /// # Errors
    ///
    /// Returns `LessonError` if there are fewer than two options or `correct`
    /// does not index into them.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, LessonError> {
        let exercise = Self {
            question: question.into(),
            options,
            correct,
            explanation: explanation.into(),
        };
        exercise.validate(0)?;
        Ok(exercise)
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn check(&self, selected: usize) -> AnswerResult {
        if selected == self.correct {
            return AnswerResult::correct(format!("Correct! {}", self.explanation));
        }
        let answer = self.options.get(self.correct).map_or("", String::as_str);
        AnswerResult::incorrect(format!(
            "Incorrect. The correct answer is: {answer}. {}",
            self.explanation
        ))
    }

    fn validate(&self, index: usize) -> Result<(), LessonError> {
        if self.options.len() < 2 {
            return Err(LessonError::TooFewOptions {
                exercise: index,
                len: self.options.len(),
            });
        }
        check_correct_index(index, self.correct, self.options.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyllableChoice {
    sentence: String,
    hint: String,
    syllable_options: Vec<String>,
    correct: usize,
}

impl SyllableChoice {
    /// # Errors
    ///
    /// Returns `LessonError::CorrectOutOfRange` if `correct` does not index into
    /// `syllable_options`.
    pub fn new(
        sentence: impl Into<String>,
        hint: impl Into<String>,
        syllable_options: Vec<String>,
        correct: usize,
    ) -> Result<Self, LessonError> {
        let exercise = Self {
            sentence: sentence.into(),
            hint: hint.into(),
            syllable_options,
            correct,
        };
        exercise.validate(0)?;
        Ok(exercise)
    }

    #[must_use]
    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn syllable_options(&self) -> &[String] {
        &self.syllable_options
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Text before and after the placeholder. A sentence without one is all "before".
    #[must_use]
    pub fn sentence_parts(&self) -> (&str, &str) {
        self.sentence
            .split_once(SENTENCE_PLACEHOLDER)
            .unwrap_or((self.sentence.as_str(), ""))
    }

    /// Prompt line shown above the syllable buttons.
    #[must_use]
    pub fn prompt(&self) -> String {
        let (before, after) = self.sentence_parts();
        format!("Complete the sentence: {before}____{after}")
    }

    #[must_use]
    pub fn check(&self, selected: usize) -> AnswerResult {
        if selected == self.correct {
            return AnswerResult::correct("Correct!");
        }
        let answer = self
            .syllable_options
            .get(self.correct)
            .map_or("", String::as_str);
        AnswerResult::incorrect(format!("Incorrect. The correct answer is: {answer}"))
    }

    fn validate(&self, index: usize) -> Result<(), LessonError> {
        check_correct_index(index, self.correct, self.syllable_options.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordBuilding {
    question: String,
    syllable_parts: Vec<String>,
    target: String,
}

impl WordBuilding {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        syllable_parts: Vec<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            syllable_parts,
            target: target.into(),
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn syllable_parts(&self) -> &[String] {
        &self.syllable_parts
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Exact, case-sensitive comparison; no trimming.
    #[must_use]
    pub fn check(&self, built: &str) -> AnswerResult {
        if built == self.target {
            AnswerResult::correct("Correct! Perfect!")
        } else {
            AnswerResult::incorrect(format!("Incorrect. The correct answer is: {}", self.target))
        }
    }
}

fn check_correct_index(exercise: usize, correct: usize, len: usize) -> Result<(), LessonError> {
    if correct >= len {
        return Err(LessonError::CorrectOutOfRange {
            exercise,
            correct,
            len,
        });
    }
    Ok(())
}

//
// ─── EXERCISE ─────────────────────────────────────────────────────────────────
//

/// One exercise of a lesson, discriminated by the `type` field on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exercise {
    MultipleChoice(MultipleChoice),
    SyllableChoice(SyllableChoice),
    WordBuilding(WordBuilding),
    /// A `type` tag this build does not know. Loads, but cannot be answered.
    Unsupported { kind: String },
}

impl Exercise {
    /// The `type` tag as written in lesson files.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Exercise::MultipleChoice(_) => "multiple_choice",
            Exercise::SyllableChoice(_) => "syllable_choice",
            Exercise::WordBuilding(_) => "word_building",
            Exercise::Unsupported { kind } => kind,
        }
    }

    /// Check an answer against this exercise.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::UnsupportedExerciseType` for unknown exercise
    /// types and `EvaluationError::AnswerMismatch` when the answer shape does
    /// not fit the exercise (e.g. a built word for a multiple-choice question).
    pub fn evaluate(&self, answer: &Answer) -> Result<AnswerResult, EvaluationError> {
        match (self, answer) {
            (Exercise::MultipleChoice(mc), Answer::Choice(idx)) => Ok(mc.check(*idx)),
            (Exercise::SyllableChoice(sc), Answer::Choice(idx)) => Ok(sc.check(*idx)),
            (Exercise::WordBuilding(wb), Answer::Built(word)) => Ok(wb.check(word)),
            (Exercise::MultipleChoice(_), Answer::Built(_)) => Err(EvaluationError::AnswerMismatch {
                exercise: "multiple_choice",
                expected: "choice",
            }),
            (Exercise::SyllableChoice(_), Answer::Built(_)) => Err(EvaluationError::AnswerMismatch {
                exercise: "syllable_choice",
                expected: "choice",
            }),
            (Exercise::WordBuilding(_), Answer::Choice(_)) => Err(EvaluationError::AnswerMismatch {
                exercise: "word_building",
                expected: "built word",
            }),
            (Exercise::Unsupported { kind }, _) => Err(EvaluationError::UnsupportedExerciseType {
                kind: kind.clone(),
            }),
        }
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), LessonError> {
        match self {
            Exercise::MultipleChoice(mc) => mc.validate(index),
            Exercise::SyllableChoice(sc) => sc.validate(index),
            Exercise::WordBuilding(_) | Exercise::Unsupported { .. } => Ok(()),
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum KnownExercise {
    MultipleChoice(MultipleChoice),
    SyllableChoice(SyllableChoice),
    WordBuilding(WordBuilding),
}

impl From<KnownExercise> for Exercise {
    fn from(known: KnownExercise) -> Self {
        match known {
            KnownExercise::MultipleChoice(mc) => Exercise::MultipleChoice(mc),
            KnownExercise::SyllableChoice(sc) => Exercise::SyllableChoice(sc),
            KnownExercise::WordBuilding(wb) => Exercise::WordBuilding(wb),
        }
    }
}

impl<'de> Deserialize<'de> for Exercise {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| <D::Error as DeError>::missing_field("type"))?
            .to_owned();

        match kind.as_str() {
            "multiple_choice" | "syllable_choice" | "word_building" => {
                KnownExercise::deserialize(value)
                    .map(Exercise::from)
                    .map_err(<D::Error as DeError>::custom)
            }
            _ => Ok(Exercise::Unsupported { kind }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn multiple_choice_messages() {
        let mc = MultipleChoice::new("Pick", strings(&["A", "B", "C"]), 1, "because").unwrap();
        let ok = mc.check(1);
        assert!(ok.correct);
        assert_eq!(ok.message, "Correct! because");

        let wrong = mc.check(0);
        assert!(!wrong.correct);
        assert_eq!(wrong.message, "Incorrect. The correct answer is: B. because");
    }

    #[test]
    fn syllable_choice_messages_skip_explanation() {
        let sc = SyllableChoice::new("저는 학생___요", "polite ending", strings(&["이에", "예"]), 0)
            .unwrap();
        assert_eq!(sc.check(0).message, "Correct!");
        assert_eq!(sc.check(1).message, "Incorrect. The correct answer is: 이에");
        assert_eq!(sc.prompt(), "Complete the sentence: 저는 학생____요");
    }

    #[test]
    fn word_building_is_exact() {
        let wb = WordBuilding::new("Build hello", strings(&["안", "녕"]), "안녕");
        assert!(wb.check("안녕").correct);
        assert_eq!(wb.check("안녕").message, "Correct! Perfect!");
        let partial = wb.check("안");
        assert!(!partial.correct);
        assert_eq!(partial.message, "Incorrect. The correct answer is: 안녕");
        assert!(!wb.check(" 안녕").correct);
    }

    #[test]
    fn constructors_enforce_correct_index() {
        let err = MultipleChoice::new("q", strings(&["A", "B"]), 2, "").unwrap_err();
        assert!(matches!(err, LessonError::CorrectOutOfRange { correct: 2, len: 2, .. }));
        let err = MultipleChoice::new("q", strings(&["A"]), 0, "").unwrap_err();
        assert!(matches!(err, LessonError::TooFewOptions { len: 1, .. }));
        assert!(SyllableChoice::new("___", "", Vec::new(), 0).is_err());
    }

    #[test]
    fn unknown_type_deserializes_as_unsupported() {
        let exercise: Exercise =
            serde_json::from_str(r#"{"type": "listening", "audio": "x.mp3"}"#).unwrap();
        assert_eq!(exercise.kind(), "listening");
        let err = exercise.evaluate(&Answer::Choice(0)).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::UnsupportedExerciseType {
                kind: "listening".into()
            }
        );
    }

    #[test]
    fn malformed_known_type_is_an_error() {
        let result: Result<Exercise, _> =
            serde_json::from_str(r#"{"type": "multiple_choice", "question": "q"}"#);
        assert!(result.is_err());
        let missing_tag: Result<Exercise, _> = serde_json::from_str(r#"{"question": "q"}"#);
        assert!(missing_tag.is_err());
    }

    #[test]
    fn answer_shape_must_match() {
        let wb = Exercise::WordBuilding(WordBuilding::new("q", strings(&["a"]), "a"));
        assert!(matches!(
            wb.evaluate(&Answer::Choice(0)),
            Err(EvaluationError::AnswerMismatch { .. })
        ));
    }
}
