use std::io;

use services::StudyService;
use storage::Storage;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod practice;
mod render;

use config::{Args, Command, print_usage};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    tracing::debug!(
        lessons_dir = %args.config.lessons_dir.display(),
        progress_file = %args.config.progress_file.display(),
        "starting"
    );
    let storage = Storage::json_files(&args.config.lessons_dir, &args.config.progress_file);
    let mut study = StudyService::new(&storage);

    match args.command {
        Command::Lessons => {
            print!("{}", render::lesson_list(&study.lessons(), &study.progress_summary()));
        }
        Command::Show(number) => {
            study.select_lesson(number)?;
            if let Some(lesson) = study.current_lesson() {
                print!("{}", render::lesson_detail(lesson, study.current_lesson_completed()));
            }
        }
        Command::Practice(number) => {
            match number {
                Some(number) => study.select_lesson(number)?,
                None => study.resume()?,
            };
            let stdin = io::stdin();
            practice::run(&mut study, &mut stdin.lock(), &mut io::stdout())?;
        }
        Command::Review { all_words } => {
            print!("{}", render::vocabulary_review(&study.vocabulary_review(), all_words));
        }
        Command::Current(number) => {
            if study.catalog().info(number).is_none() {
                tracing::warn!("lesson {number} is not in the lessons directory");
            }
            study.mark_current(number);
            println!("Current lesson set to {number}");
        }
        Command::Help => print_usage(),
    }
    Ok(())
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
