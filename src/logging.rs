//! Logging bootstrap.
//!
//! Messages go to stderr so reports on stdout stay clean for piping. The level
//! comes from `--log-level`, else `TRENDFIT_LOG` (a `.env` file is loaded
//! first), else `warn`.

use clap::ValueEnum;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_ENV: &str = "TRENDFIT_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Pick the effective level from the CLI flag and the environment value.
pub fn resolve_level(cli: Option<LogLevel>, env: Option<&str>) -> LevelFilter {
    if let Some(level) = cli {
        return level.filter();
    }
    env.and_then(|value| LogLevel::from_str(value.trim(), true).ok())
        .map_or(LevelFilter::Warn, LogLevel::filter)
}

/// Install the terminal logger.
///
/// A second call (e.g. from tests) leaves the existing logger in place.
pub fn init(cli: Option<LogLevel>) {
    dotenvy::dotenv().ok();
    let env = std::env::var(LOG_ENV).ok();
    let level = resolve_level(cli, env.as_deref());

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);
}
