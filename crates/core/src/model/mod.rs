pub mod exercise;
mod ids;
mod lesson;
mod progress;
mod vocab;

pub use exercise::{
    Answer, AnswerResult, EvaluationError, Exercise, MultipleChoice, SyllableChoice,
    WordBuilding, SENTENCE_PLACEHOLDER,
};
pub use ids::LessonNumber;
pub use lesson::{
    Example, GrammarRule, Lesson, LessonError, LessonOverview, LessonSummary, VocabEntry,
};
pub use progress::{ProgressRecord, ProgressSummary};
pub use vocab::{DEFAULT_VOCAB_PER_PAGE, NO_VOCABULARY, VocabPager};
