use std::fmt;
use std::fs;
use std::path::PathBuf;

use lesson_core::model::Lesson;
use serde_json::json;
use storage::fs::{DEFAULT_LESSONS_DIR, JsonLessonStore};

#[derive(Debug, Clone)]
struct Args {
    dir: PathBuf,
    force: bool,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDir { raw } => write!(f, "invalid --dir value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut dir = std::env::var("HANGUL_LESSONS_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_LESSONS_DIR), PathBuf::from);
        let mut force = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dir" => {
                    let value = require_value(&mut args, "--dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDir { raw: value });
                    }
                    dir = PathBuf::from(value);
                }
                "--force" => force = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { dir, force })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dir <path>              Lessons directory (default: lessons)");
    eprintln!("  --force                   Overwrite lesson files that already exist");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  HANGUL_LESSONS_DIR");
}

fn sample_lessons() -> Vec<serde_json::Value> {
    vec![
        json!({
            "lesson_number": 1,
            "lesson_title": "Greetings",
            "vocabulary": [
                {"korean": "안녕하세요", "romanization": "annyeonghaseyo", "english": "Hello"},
                {"korean": "감사합니다", "romanization": "gamsahamnida", "english": "Thank you"},
                {"korean": "네", "romanization": "ne", "english": "Yes"},
                {"korean": "아니요", "romanization": "aniyo", "english": "No"}
            ],
            "grammar_rules": [
                {
                    "title": "Polite speech",
                    "explanation": "Verbs ending in -요 are polite and safe with strangers.",
                    "pattern": "Verb stem + 아요/어요",
                    "formality_note": "Polite informal"
                }
            ],
            "example_sentences": [
                {"korean": "안녕하세요, 저는 민수예요.", "romanization": "annyeonghaseyo, jeoneun minsuyeyo.", "english": "Hello, I am Minsu."}
            ],
            "exercises": [
                {
                    "type": "multiple_choice",
                    "question": "What does 감사합니다 mean?",
                    "options": ["Hello", "Thank you", "Goodbye"],
                    "correct": 1,
                    "explanation": "감사합니다 is the formal way to say thank you."
                },
                {
                    "type": "syllable_choice",
                    "sentence": "안녕하세___",
                    "hint": "Polite ending",
                    "syllable_options": ["요", "다", "니"],
                    "correct": 0
                },
                {
                    "type": "word_building",
                    "question": "Build the word for 'hello' (casual)",
                    "syllable_parts": ["녕", "안"],
                    "target": "안녕"
                }
            ]
        }),
        json!({
            "lesson_number": 2,
            "lesson_title": "Numbers",
            "vocabulary": [
                {"korean": "하나", "romanization": "hana", "english": "One"},
                {"korean": "둘", "romanization": "dul", "english": "Two"},
                {"korean": "셋", "romanization": "set", "english": "Three"}
            ],
            "grammar_rules": [
                {
                    "title": "Native Korean numbers",
                    "explanation": "Used for counting items and hours.",
                    "pattern": "Number + counter"
                }
            ],
            "example_sentences": [
                {"korean": "사과 하나 주세요.", "romanization": "sagwa hana juseyo.", "english": "One apple, please."}
            ],
            "exercises": [
                {
                    "type": "multiple_choice",
                    "question": "Which word means 'two'?",
                    "options": ["하나", "둘", "셋"],
                    "correct": 1,
                    "explanation": "둘 is the native Korean number two."
                }
            ]
        }),
    ]
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    fs::create_dir_all(&args.dir)?;
    let store = JsonLessonStore::new(&args.dir);

    let mut written = 0;
    for value in sample_lessons() {
        // Validate before writing.
        let lesson: Lesson = serde_json::from_value(value.clone())?;
        let path = store.lesson_path(lesson.number());
        if path.exists() && !args.force {
            println!("Skipping existing {}", path.display());
            continue;
        }
        fs::write(&path, serde_json::to_string_pretty(&value)?)?;
        written += 1;
    }

    println!("Seeded {written} lesson file(s) into {}", args.dir.display());
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
