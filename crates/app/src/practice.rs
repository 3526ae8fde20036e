use std::io::{self, BufRead, Write};

use lesson_core::model::{Answer, AnswerResult, Exercise};
use services::{SessionStep, StudyError, StudyService};

use crate::render;

/// Walk the open lesson's exercises, reading answers line by line.
///
/// Stops early at end of input; progress already recorded is kept.
pub fn run(study: &mut StudyService, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
    let Some(session) = study.session() else {
        return writeln!(out, "No lesson selected.");
    };
    if session.total_exercises() == 0 {
        return writeln!(out, "No exercises in this lesson.");
    }

    let mut line = String::new();
    loop {
        let Some(session) = study.session() else {
            return Ok(());
        };
        let Some(exercise) = session.current_exercise().cloned() else {
            break;
        };
        write!(out, "\n{}> ", render::exercise_prompt(&exercise, &session.progress()))?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let Some(answer) = parse_answer(&exercise, line.trim()) else {
            writeln!(out, "Please enter the number(s) of your choice.")?;
            continue;
        };
        let result = match answer {
            Answer::Built(_) => submit_syllables(study, &exercise, line.trim()),
            Answer::Choice(_) => study.submit_answer(&answer),
        };
        match result {
            Ok(result) => writeln!(out, "{}", result.message)?,
            Err(err) => writeln!(out, "Error: {err}")?,
        }

        if let Ok(SessionStep::Completed(_)) = study.advance_exercise() {
            break;
        }
    }

    writeln!(out, "\nAll exercises completed! Great job!")?;
    if let Some(next) = study.next_lesson_offer() {
        writeln!(out, "Next lesson available: {next}")?;
    }
    Ok(())
}

/// `None` when the input is not a valid selection for `exercise`.
fn parse_answer(exercise: &Exercise, raw: &str) -> Option<Answer> {
    match exercise {
        Exercise::MultipleChoice(mc) => parse_choice(raw, mc.options().len()).map(Answer::Choice),
        Exercise::SyllableChoice(sc) => {
            parse_choice(raw, sc.syllable_options().len()).map(Answer::Choice)
        }
        Exercise::WordBuilding(_) => {
            built_syllables(exercise, raw).map(|syllables| Answer::Built(syllables.concat()))
        }
        Exercise::Unsupported { .. } => Some(Answer::Choice(0)),
    }
}

/// One-based choice in `1..=len`, returned zero-based.
fn parse_choice(raw: &str, len: usize) -> Option<usize> {
    let choice: usize = raw.parse().ok()?;
    (1..=len).contains(&choice).then(|| choice - 1)
}

/// Syllables picked by space-separated one-based numbers. `None` if any
/// number is out of range or nothing was picked.
fn built_syllables<'a>(exercise: &'a Exercise, raw: &str) -> Option<Vec<&'a str>> {
    let Exercise::WordBuilding(wb) = exercise else {
        return None;
    };
    let parts = wb.syllable_parts();
    let syllables = raw
        .split_whitespace()
        .map(|part| parse_choice(part, parts.len()).map(|idx| parts[idx].as_str()))
        .collect::<Option<Vec<_>>>()?;
    (!syllables.is_empty()).then_some(syllables)
}

/// Fill the session's word buffer and grade it.
fn submit_syllables(
    study: &mut StudyService,
    exercise: &Exercise,
    raw: &str,
) -> Result<AnswerResult, StudyError> {
    let session = study.session_mut().ok_or(StudyError::NoLessonSelected)?;
    session.clear_built_word();
    for syllable in built_syllables(exercise, raw).unwrap_or_default() {
        session.add_syllable(syllable);
    }
    Ok(session.submit_built_word()?)
}
