use std::fmt;
use std::path::PathBuf;

use serde_json::json;
use services::{AppServices, Clock};
use tracing_subscriber::EnvFilter;
use wordy_core::catalog::CatalogSource;
use wordy_core::model::{SettingsDraft, StudyGroupId, WordId};

const DEFAULT_DB_URL: &str = "sqlite://wordy.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidGroupId { raw: String },
    InvalidWordId { raw: String },
    InvalidDailyLimit { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidGroupId { raw } => write!(f, "invalid --group value: {raw}"),
            ArgsError::InvalidWordId { raw } => write!(f, "invalid --word value: {raw}"),
            ArgsError::InvalidDailyLimit { raw } => {
                write!(f, "invalid --daily-limit value: {raw}")
            }
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
    eprintln!("  wordy seed     [--db <sqlite_url>] [--catalog <path>]");
    eprintln!("  wordy overview [--db <sqlite_url>] [--catalog <path>]");
    eprintln!("  wordy quiz     [--db <sqlite_url>] [--catalog <path>] [--group <uuid>]");
    eprintln!("  wordy words    [--db <sqlite_url>] [--catalog <path>]");
    eprintln!("  wordy toggle   --word <uuid> [--db <sqlite_url>] [--catalog <path>]");
    eprintln!("  wordy settings [--daily-limit <n>] [--language <en|ko|zh|ja>] [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  command: overview");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --catalog (bundled word list)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WORDY_DB_URL, WORDY_CATALOG, WORDY_LOG (or RUST_LOG)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Seed,
    Overview,
    Quiz,
    Words,
    Toggle,
    Settings,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "seed" => Some(Self::Seed),
            "overview" => Some(Self::Overview),
            "quiz" => Some(Self::Quiz),
            "words" => Some(Self::Words),
            "toggle" => Some(Self::Toggle),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    catalog: CatalogSource,
    group: Option<StudyGroupId>,
    word: Option<WordId>,
    settings: SettingsDraft,
}

impl Args {
    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("WORDY_DB_URL")
            .ok()
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut catalog = std::env::var("WORDY_CATALOG")
            .ok()
            .map_or(CatalogSource::Bundled, |path| {
                CatalogSource::File(PathBuf::from(path))
            });
        let mut group = None;
        let mut word = None;
        let mut settings = SettingsDraft::default();

        while let Some(arg) = args.next() {
            match (arg.as_str(), cmd) {
                ("--db", _) => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                ("--catalog", _) => {
                    let value = require_value(args, "--catalog")?;
                    catalog = CatalogSource::File(PathBuf::from(value));
                }
                ("--group", Command::Quiz) => {
                    let value = require_value(args, "--group")?;
                    let parsed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidGroupId { raw: value.clone() })?;
                    group = Some(parsed);
                }
                ("--word", Command::Toggle) => {
                    let value = require_value(args, "--word")?;
                    let parsed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidWordId { raw: value.clone() })?;
                    word = Some(parsed);
                }
                ("--daily-limit", Command::Settings) => {
                    let value = require_value(args, "--daily-limit")?;
                    let parsed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDailyLimit { raw: value.clone() })?;
                    settings.daily_word_limit = Some(parsed);
                }
                ("--language", Command::Settings) => {
                    settings.learning_language = Some(require_value(args, "--language")?);
                }
                ("--help" | "-h", _) => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Toggle && word.is_none() {
            return Err(ArgsError::MissingValue { flag: "--word" });
        }

        Ok(Self {
            db_url,
            catalog,
            group,
            word,
            settings,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let level = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var("WORDY_LOG"))
        .unwrap_or_else(|_| "info".into());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Overview,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Overview,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate + seed at startup; the subcommands only read and write through services.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system(), parsed.catalog).await?;
    if !services.seed_report().is_clean() {
        tracing::warn!("startup seeding was incomplete; see the seed report");
    }

    match cmd {
        Command::Seed => print_json(services.seed_report()),
        Command::Overview => print_json(&services.home().overview().await?),
        Command::Quiz => {
            let quiz = match parsed.group {
                Some(group) => services.quiz().start_group_quiz(group).await?,
                None => services.quiz().start_quiz().await?,
            };
            print_json(&json!({
                "complete": quiz.is_complete(),
                "questions": quiz.questions(),
            }))
        }
        Command::Words => print_json(&services.words().list_words().await?),
        Command::Toggle => {
            let id = parsed.word.ok_or(ArgsError::MissingValue { flag: "--word" })?;
            print_json(&services.words().toggle_learned(id).await?)
        }
        Command::Settings => {
            let settings = if parsed.settings.daily_word_limit.is_none()
                && parsed.settings.learning_language.is_none()
            {
                services.settings().load().await?
            } else {
                services.settings().save(parsed.settings).await?
            };
            print_json(&settings)
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(error = %err, "wordy failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(cmd: Command, args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(cmd, &mut iter)
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/wordy.sqlite3".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/wordy.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }

    #[test]
    fn group_flag_only_applies_to_quiz() {
        let id = StudyGroupId::new_v4();
        let parsed = parse(Command::Quiz, &["--group", &id.to_string()]).unwrap();
        assert_eq!(parsed.group, Some(id));

        let err = parse(Command::Overview, &["--group", &id.to_string()]).unwrap_err();
        assert!(matches!(err, ArgsError::UnknownArg(_)));
    }

    #[test]
    fn toggle_requires_word() {
        let err = parse(Command::Toggle, &[]).unwrap_err();
        assert!(matches!(err, ArgsError::MissingValue { flag: "--word" }));

        let err = parse(Command::Toggle, &["--word", "nope"]).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidWordId { .. }));
    }

    #[test]
    fn settings_flags_fill_the_draft() {
        let parsed = parse(Command::Settings, &["--daily-limit", "12", "--language", "ko"]).unwrap();
        assert_eq!(parsed.settings.daily_word_limit, Some(12));
        assert_eq!(parsed.settings.learning_language.as_deref(), Some("ko"));
    }

    #[test]
    fn catalog_flag_points_at_file() {
        let parsed = parse(Command::Seed, &["--catalog", "/tmp/words.csv"]).unwrap();
        assert_eq!(parsed.catalog, CatalogSource::File(PathBuf::from("/tmp/words.csv")));
    }
}
