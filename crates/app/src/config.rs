use std::fmt;
use std::path::PathBuf;

use lesson_core::model::LessonNumber;
use storage::fs::{DEFAULT_LESSONS_DIR, DEFAULT_PROGRESS_FILE};

pub const LESSONS_DIR_ENV: &str = "HANGUL_LESSONS_DIR";
pub const PROGRESS_FILE_ENV: &str = "HANGUL_PROGRESS_FILE";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidPath { flag: &'static str, raw: String },
    InvalidLesson { raw: String },
    MissingLesson { command: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidPath { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidLesson { raw } => write!(f, "invalid lesson number: {raw}"),
            ArgsError::MissingLesson { command } => {
                write!(f, "{command} requires a lesson number")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

/// Where lessons and progress live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub lessons_dir: PathBuf,
    pub progress_file: PathBuf,
}

impl AppConfig {
    /// Defaults, overridden by environment.
    pub fn from_env(env: impl Fn(&str) -> Option<String>) -> Self {
        let lessons_dir = env(LESSONS_DIR_ENV)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_LESSONS_DIR), PathBuf::from);
        let progress_file = env(PROGRESS_FILE_ENV)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_PROGRESS_FILE), PathBuf::from);
        Self {
            lessons_dir,
            progress_file,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List lessons with completion marks.
    Lessons,
    /// Print a lesson's content.
    Show(LessonNumber),
    /// Work through a lesson's exercises on stdin; defaults to the current lesson.
    Practice(Option<LessonNumber>),
    /// Vocabulary from completed lessons plus the current one.
    Review { all_words: bool },
    /// Set the resume point.
    Current(LessonNumber),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config: AppConfig,
    pub command: Command,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn require_path(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<PathBuf, ArgsError> {
    let value = require_value(args, flag)?;
    if value.trim().is_empty() {
        return Err(ArgsError::InvalidPath { flag, raw: value });
    }
    Ok(PathBuf::from(value))
}

fn parse_lesson(raw: &str) -> Result<LessonNumber, ArgsError> {
    raw.parse::<u32>()
        .ok()
        .filter(|value| *value > 0)
        .map(LessonNumber::new)
        .ok_or_else(|| ArgsError::InvalidLesson {
            raw: raw.to_string(),
        })
}

impl Args {
    /// Parse `[--lessons-dir D] [--progress-file F] [command] [args]`.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags/commands or bad lesson numbers.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut config = AppConfig::from_env(env);
        let mut all_words = false;
        let mut positional = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--lessons-dir" => config.lessons_dir = require_path(&mut args, "--lessons-dir")?,
                "--progress-file" => {
                    config.progress_file = require_path(&mut args, "--progress-file")?;
                }
                "--all" => all_words = true,
                "--help" | "-h" => {
                    return Ok(Self {
                        config,
                        command: Command::Help,
                    });
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("lessons") => Command::Lessons,
            Some("show") => {
                let raw = positional
                    .next()
                    .ok_or(ArgsError::MissingLesson { command: "show" })?;
                Command::Show(parse_lesson(&raw)?)
            }
            Some("practice") => {
                let lesson = positional.next().as_deref().map(parse_lesson).transpose()?;
                Command::Practice(lesson)
            }
            Some("review") => Command::Review { all_words },
            Some("current") => {
                let raw = positional
                    .next()
                    .ok_or(ArgsError::MissingLesson { command: "current" })?;
                Command::Current(parse_lesson(&raw)?)
            }
            Some("help") => Command::Help,
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Self { config, command })
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options] [command]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  lessons                   List lessons and progress (default)");
    eprintln!("  show <n>                  Print vocabulary, grammar and examples of lesson n");
    eprintln!("  practice [n]              Answer lesson n's exercises (default: current lesson)");
    eprintln!("  review [--all]            Review learned vocabulary (--all: one sorted list)");
    eprintln!("  current <n>               Set the lesson to resume from");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --lessons-dir <path>      Lesson files directory (default: lessons)");
    eprintln!("  --progress-file <path>    Progress file (default: progress.json)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {LESSONS_DIR_ENV}, {PROGRESS_FILE_ENV}, RUST_LOG");
}
