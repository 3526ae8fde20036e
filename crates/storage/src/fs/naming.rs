use lesson_core::model::LessonNumber;

const PREFIX: &str = "lesson_";
const SUFFIX: &str = ".json";

/// `lesson_03.json`; numbers past 99 simply get more digits.
#[must_use]
pub fn lesson_file_name(number: LessonNumber) -> String {
    format!("{PREFIX}{:02}{SUFFIX}", number.value())
}

/// Inverse of [`lesson_file_name`]. Anything else (including `lesson_3.json`)
/// is not a lesson file.
#[must_use]
pub fn parse_lesson_file_name(name: &str) -> Option<LessonNumber> {
    let digits = name.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
    if digits.len() < 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number = LessonNumber::new(digits.parse().ok()?);
    (lesson_file_name(number) == name).then_some(number)
}
