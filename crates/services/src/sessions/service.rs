use std::fmt;

use lesson_core::model::{Answer, AnswerResult, Exercise, Lesson, LessonNumber};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a session stands in its exercise list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Showing the exercise at this zero-based index.
    InProgress(usize),
    Completed,
}

/// Result of [`ExerciseSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// Moved on to the exercise at this index.
    Next(usize),
    /// The last exercise is done; the lesson should be marked completed.
    Completed(LessonNumber),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Walks a lesson's exercises one at a time.
///
/// Answers are checked by [`submit_answer`](Self::submit_answer) without moving
/// on; the caller shows the result and then calls [`advance`](Self::advance).
pub struct ExerciseSession {
    lesson: LessonNumber,
    exercises: Vec<Exercise>,
    state: SessionState,
    built_word: String,
    last_result: Option<AnswerResult>,
}

impl ExerciseSession {
    /// Start at the first exercise, or `Completed` if the lesson has none.
    #[must_use]
    pub fn new(lesson: &Lesson) -> Self {
        let exercises = lesson.exercises().to_vec();
        Self {
            lesson: lesson.number(),
            state: Self::initial_state(&exercises),
            exercises,
            built_word: String::new(),
            last_result: None,
        }
    }

    fn initial_state(exercises: &[Exercise]) -> SessionState {
        if exercises.is_empty() {
            SessionState::Completed
        } else {
            SessionState::InProgress(0)
        }
    }

    #[must_use]
    pub fn lesson(&self) -> LessonNumber {
        self.lesson
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Completed
    }

    #[must_use]
    pub fn total_exercises(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&Exercise> {
        match self.state {
            SessionState::InProgress(index) => self.exercises.get(index),
            SessionState::Completed => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.exercises.len();
        let position = match self.state {
            SessionState::InProgress(index) => index + 1,
            SessionState::Completed => total,
        };
        SessionProgress {
            position,
            total,
            is_complete: self.is_complete(),
        }
    }

    /// Result of the most recent submission for the current exercise.
    #[must_use]
    pub fn last_result(&self) -> Option<&AnswerResult> {
        self.last_result.as_ref()
    }

    /// Check an answer against the current exercise. Does not advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once all exercises are done, or
    /// `SessionError::Evaluation` if the exercise type is unsupported or the
    /// answer does not fit it.
    pub fn submit_answer(&mut self, answer: &Answer) -> Result<AnswerResult, SessionError> {
        let exercise = self.current_exercise().ok_or(SessionError::Completed)?;
        let result = exercise.evaluate(answer)?;
        self.last_result = Some(result.clone());
        Ok(result)
    }

    /// # Errors
    ///
    /// See [`submit_answer`](Self::submit_answer).
    pub fn submit_choice(&mut self, index: usize) -> Result<AnswerResult, SessionError> {
        self.submit_answer(&Answer::Choice(index))
    }

    /// Append a syllable to the word being built.
    pub fn add_syllable(&mut self, syllable: &str) {
        self.built_word.push_str(syllable);
    }

    pub fn clear_built_word(&mut self) {
        self.built_word.clear();
    }

    #[must_use]
    pub fn built_word(&self) -> &str {
        &self.built_word
    }

    /// Submit the word assembled so far.
    ///
    /// # Errors
    ///
    /// See [`submit_answer`](Self::submit_answer).
    pub fn submit_built_word(&mut self) -> Result<AnswerResult, SessionError> {
        let answer = Answer::Built(self.built_word.clone());
        self.submit_answer(&answer)
    }

    /// Move to the next exercise.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session was already finished.
    pub fn advance(&mut self) -> Result<SessionStep, SessionError> {
        let SessionState::InProgress(index) = self.state else {
            return Err(SessionError::Completed);
        };
        self.built_word.clear();
        self.last_result = None;

        let next = index + 1;
        if next >= self.exercises.len() {
            self.state = SessionState::Completed;
            Ok(SessionStep::Completed(self.lesson))
        } else {
            self.state = SessionState::InProgress(next);
            Ok(SessionStep::Next(next))
        }
    }

    /// Go back to the first exercise.
    pub fn restart(&mut self) {
        self.state = Self::initial_state(&self.exercises);
        self.built_word.clear();
        self.last_result = None;
    }
}

impl fmt::Debug for ExerciseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExerciseSession")
            .field("lesson", &self.lesson)
            .field("exercises_len", &self.exercises.len())
            .field("state", &self.state)
            .field("built_word", &self.built_word)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::{EvaluationError, MultipleChoice, SyllableChoice, WordBuilding};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn build_lesson(exercises: Vec<Exercise>) -> Lesson {
        Lesson::new(
            LessonNumber::new(1),
            "Greetings",
            Vec::new(),
            Vec::new(),
            Vec::new(),
            exercises,
        )
        .unwrap()
    }

    fn multiple_choice() -> Exercise {
        Exercise::MultipleChoice(
            MultipleChoice::new("Which?", strings(&["A", "B", "C"]), 1, "because").unwrap(),
        )
    }

    fn word_building() -> Exercise {
        Exercise::WordBuilding(WordBuilding::new("Build hello", strings(&["안", "녕"]), "안녕"))
    }

    #[test]
    fn empty_lesson_is_completed_immediately() {
        let mut session = ExerciseSession::new(&build_lesson(Vec::new()));
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.current_exercise().is_none());
        assert_eq!(session.submit_choice(0), Err(SessionError::Completed));
        assert_eq!(session.advance(), Err(SessionError::Completed));
    }

    #[test]
    fn multiple_choice_scenario() {
        let mut session = ExerciseSession::new(&build_lesson(vec![multiple_choice()]));

        let ok = session.submit_choice(1).unwrap();
        assert!(ok.correct);
        assert_eq!(ok.message, "Correct! because");

        let wrong = session.submit_choice(0).unwrap();
        assert!(!wrong.correct);
        assert_eq!(wrong.message, "Incorrect. The correct answer is: B. because");
        assert_eq!(session.last_result(), Some(&wrong));

        // Submitting never advances.
        assert_eq!(session.state(), SessionState::InProgress(0));
    }

    #[test]
    fn word_building_scenario() {
        let mut session = ExerciseSession::new(&build_lesson(vec![word_building()]));

        session.add_syllable("안");
        let partial = session.submit_built_word().unwrap();
        assert!(!partial.correct);
        assert_eq!(partial.message, "Incorrect. The correct answer is: 안녕");

        session.add_syllable("녕");
        assert_eq!(session.built_word(), "안녕");
        assert!(session.submit_built_word().unwrap().correct);

        session.clear_built_word();
        assert_eq!(session.built_word(), "");
    }

    #[test]
    fn advance_walks_to_completion() {
        let sc = Exercise::SyllableChoice(
            SyllableChoice::new("저는 학생___요", "ending", strings(&["이에", "예"]), 0).unwrap(),
        );
        let mut session =
            ExerciseSession::new(&build_lesson(vec![multiple_choice(), sc, word_building()]));
        assert_eq!(session.progress().label(), "Exercise 1 of 3");

        assert_eq!(session.advance(), Ok(SessionStep::Next(1)));
        assert_eq!(session.submit_choice(1).unwrap().message, "Incorrect. The correct answer is: 이에");
        assert_eq!(session.advance(), Ok(SessionStep::Next(2)));
        session.add_syllable("안");
        assert_eq!(
            session.advance(),
            Ok(SessionStep::Completed(LessonNumber::new(1)))
        );
        assert!(session.is_complete());
        assert_eq!(session.built_word(), "");
        assert_eq!(session.progress().position, 3);
    }

    #[test]
    fn restart_returns_to_first_exercise() {
        let mut session =
            ExerciseSession::new(&build_lesson(vec![multiple_choice(), word_building()]));
        session.advance().unwrap();
        session.advance().unwrap();
        assert!(session.is_complete());

        session.restart();
        assert_eq!(session.state(), SessionState::InProgress(0));
        assert!(session.last_result().is_none());
    }

    #[test]
    fn unsupported_exercise_is_surfaced() {
        let unknown = Exercise::Unsupported {
            kind: "listening".into(),
        };
        let mut session = ExerciseSession::new(&build_lesson(vec![unknown]));
        let err = session.submit_choice(0).unwrap_err();
        assert_eq!(
            err,
            SessionError::Evaluation(EvaluationError::UnsupportedExerciseType {
                kind: "listening".into()
            })
        );
        // Still possible to skip past it.
        assert!(matches!(session.advance(), Ok(SessionStep::Completed(_))));
    }
}
