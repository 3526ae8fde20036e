//! Plain-text views over the read-only models.

use std::fmt::Write;

use lesson_core::model::{Exercise, Lesson, NO_VOCABULARY, ProgressSummary};
use services::{LessonListItem, SessionProgress, VocabularyReview};

pub fn lesson_list(items: &[LessonListItem], progress: &ProgressSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", progress.headline());
    if items.is_empty() {
        out.push_str("No lessons found. Please add lesson files to the lessons folder.\n");
        return out;
    }
    for item in items {
        let mark = if item.completed { "✓" } else { " " };
        let _ = writeln!(
            out,
            "[{mark}] Lesson {}: {}",
            item.summary.number, item.summary.title
        );
    }
    out
}

pub fn lesson_detail(lesson: &Lesson, completed: bool) -> String {
    let mut out = String::new();
    let overview = lesson.overview();
    let _ = writeln!(out, "{}", lesson.heading());
    let _ = writeln!(out, "{}", if completed { "✓ Completed" } else { "In Progress" });
    let _ = writeln!(
        out,
        "{} vocabulary words, {} grammar rules, {} exercises",
        overview.vocabulary_count, overview.grammar_rule_count, overview.exercise_count
    );

    out.push_str("\nVocabulary\n");
    if lesson.vocabulary().is_empty() {
        let _ = writeln!(out, "  {NO_VOCABULARY}");
    }
    for entry in lesson.vocabulary() {
        let _ = writeln!(out, "  {} [{}] - {}", entry.korean, entry.romanization, entry.english);
    }

    out.push_str("\nGrammar\n");
    for rule in lesson.grammar_rules() {
        let _ = writeln!(out, "  {}", rule.title);
        let _ = writeln!(out, "    Pattern: {}", rule.pattern);
        let _ = writeln!(out, "    {}", rule.explanation);
        if let Some(note) = &rule.formality_note {
            let _ = writeln!(out, "    Note: {note}");
        }
    }

    out.push_str("\nExamples\n");
    for example in lesson.example_sentences() {
        let _ = writeln!(out, "  {}", example.korean);
        let _ = writeln!(out, "    [{}] {}", example.romanization, example.english);
    }
    out
}

pub fn exercise_prompt(exercise: &Exercise, progress: &SessionProgress) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", progress.label());
    match exercise {
        Exercise::MultipleChoice(mc) => {
            let _ = writeln!(out, "{}", mc.question());
            numbered(&mut out, mc.options());
        }
        Exercise::SyllableChoice(sc) => {
            let _ = writeln!(out, "{}", sc.prompt());
            let _ = writeln!(out, "Hint: {}", sc.hint());
            numbered(&mut out, sc.syllable_options());
        }
        Exercise::WordBuilding(wb) => {
            let _ = writeln!(out, "{}", wb.question());
            numbered(&mut out, wb.syllable_parts());
            out.push_str("Enter syllable numbers in order, separated by spaces.\n");
        }
        Exercise::Unsupported { kind } => {
            let _ = writeln!(out, "(exercise type '{kind}' cannot be shown)");
        }
    }
    out
}

fn numbered(out: &mut String, items: &[String]) {
    for (idx, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}) {item}", idx + 1);
    }
}

pub fn vocabulary_review(review: &VocabularyReview, all_words: bool) -> String {
    let mut out = String::new();
    if review.is_empty() {
        out.push_str("No vocabulary learned yet. Complete some lessons to see your vocabulary here!\n");
        return out;
    }
    let _ = writeln!(out, "{}", review.stats_line());

    if all_words {
        let words = review.all_words();
        let _ = writeln!(out, "\nAll Vocabulary ({} words)", words.len());
        for word in words {
            let _ = writeln!(
                out,
                "  {} [{}] - {} ({})",
                word.entry.korean, word.entry.romanization, word.entry.english, word.lesson_heading
            );
        }
    } else {
        for group in review.by_lesson() {
            let _ = writeln!(out, "\n{}", group.heading);
            for entry in &group.words {
                let _ = writeln!(out, "  {} [{}] - {}", entry.korean, entry.romanization, entry.english);
            }
        }
    }
    out
}
