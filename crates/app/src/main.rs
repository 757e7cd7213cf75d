mod commands;
mod render;

use std::fmt;
use std::path::PathBuf;

use lesson_core::NavOutcome;
use services::{FileSource, LessonSession, Notice, SessionError, read_lesson};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{Command, HELP, intent_for};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    MissingLesson,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::MissingLesson => write!(f, "no lesson file given"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  lesson-viewer play  [<lesson.json>] [--seed <n>]");
    eprintln!("  lesson-viewer check <lesson.json> [--json]");
    eprintln!();
    eprintln!("With no subcommand, play is assumed.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LESSON_FILE   lesson to open when none is given");
    eprintln!("  LESSON_SEED   shuffle seed for reproducible runs");
    eprintln!("  LESSON_LOG    log filter (falls back to RUST_LOG, then info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Play,
    Check,
}

impl Mode {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    lesson: Option<PathBuf>,
    seed: Option<u64>,
    json: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            lesson: std::env::var("LESSON_FILE").ok().map(PathBuf::from),
            seed: std::env::var("LESSON_SEED")
                .ok()
                .and_then(|value| value.parse().ok()),
            json: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "--json" => parsed.json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => parsed.lesson = Some(PathBuf::from(arg)),
            }
        }

        Ok(parsed)
    }
}

fn init_logging() {
    let filter = std::env::var("LESSON_LOG")
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    // Logs go to stderr so they never mix with the player's output.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let mode = match argv.first().map(String::as_str) {
        None => Mode::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) => Mode::from_arg(first).unwrap_or(Mode::Play),
    };
    if argv.first().and_then(|a| Mode::from_arg(a)).is_some() {
        argv.remove(0);
    }

    // `main` prints the error itself.
    let parsed = Args::parse(&mut argv.into_iter()).inspect_err(|_| print_usage())?;

    init_logging();

    match mode {
        Mode::Check => check(&parsed).await,
        Mode::Play => play(&parsed).await,
    }
}

/// Validate a lesson file and print what it contains.
async fn check(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let path = args.lesson.clone().ok_or(ArgsError::MissingLesson)?;
    let lesson = read_lesson(&FileSource::new(path)).await?;

    let mut session = LessonSession::new();
    let report = session.install(lesson);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}: {}", report.lesson_id, report.title);
    println!("  slides: {}", report.slide_count);
    println!("  obtainable points: {}", report.obtainable);
    if let Some(lesson) = session.lesson() {
        for (index, slide) in lesson.slides().iter().enumerate() {
            println!("  {:>2}. {} ({} components)", index + 1, slide.title, slide.components.len());
            for component in &slide.components {
                if !session.registry().is_known(&component.kind) {
                    println!("      {} uses unknown type '{}'", component.id, component.kind);
                }
            }
        }
    }
    Ok(())
}

async fn play(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = LessonSession::new();
    if let Some(seed) = args.seed {
        session = session.with_seed(seed);
    }
    tracing::debug!(session = %session.id(), "player started");

    if let Some(path) = &args.lesson {
        load(&mut session, path.clone()).await;
    } else {
        println!("No lesson loaded. Use `load <path>` or `help`.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(commands::CommandError::Empty) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Load(path) => load(&mut session, path).await,
            Command::Reset => {
                session.reset();
                println!("Back to start. Use `load <path>` to open a lesson.");
            }
            Command::Next => {
                let outcome = session.advance();
                navigated(&session, outcome);
            }
            Command::Prev => {
                let outcome = session.retreat();
                navigated(&session, outcome);
            }
            Command::Goto(number) => {
                let outcome = session.jump_to(number.saturating_sub(1));
                navigated(&session, outcome);
            }
            Command::Slides => print!("{}", render::overview(&session.overview())),
            Command::Info => match session.info() {
                Some(info) => print!("{}", render::info(&info)),
                None => println!("No lesson loaded."),
            },
            Command::Score => println!("{}", session.score().label()),
            Command::Show => show(&session),
            Command::Component { id, verb, args } => {
                let Some(kind) = session.instance(&id).map(|m| m.kind()) else {
                    let err = if session.is_loaded() {
                        SessionError::UnknownComponent(id)
                    } else {
                        SessionError::NoLesson
                    };
                    println!("{err}");
                    continue;
                };
                match intent_for(kind, &verb, &args) {
                    Ok(intent) => match session.interact(&id, intent) {
                        Ok(_) => show(&session),
                        Err(err) => println!("{err}"),
                    },
                    Err(err) => println!("{err}"),
                }
            }
        }
    }
    Ok(())
}

fn navigated(session: &LessonSession, outcome: NavOutcome) {
    if outcome.moved() {
        show(session);
    } else if session.is_loaded() {
        println!("(no change)");
    } else {
        println!("No lesson loaded.");
    }
}

fn show(session: &LessonSession) {
    match session.slide_view() {
        Some(view) => println!("{}", render::slide(&view)),
        None if session.is_loaded() => println!("This lesson has no slides."),
        None => println!("No lesson loaded."),
    }
}

async fn load(session: &mut LessonSession, path: PathBuf) {
    let result = session.import_from(&FileSource::new(path)).await;
    println!("{}", Notice::from_result(&result));
    if result.is_ok() {
        show(session);
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
