// Conditional logging macros - only active in debug builds
// plus the env_logger setup shared by both front ends

use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "wordle-assist";
const LOG_FILE_NAME: &str = "wordle-assist.log";

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    /// Appended to a file; the TUI owns the terminal
    File(PathBuf),
    Disabled,
}

impl LogDestination {
    /// Line mode logs to stderr unless a file is given. The TUI needs a file,
    /// falling back to the platform data directory, or logs nothing.
    pub fn choose(tui: bool, log_file: Option<&Path>) -> Self {
        match (log_file, tui) {
            (Some(path), _) => Self::File(path.to_path_buf()),
            (None, false) => Self::Stderr,
            (None, true) => default_log_path().map_or(Self::Disabled, Self::File),
        }
    }
}

/// `<data_local_dir>/wordle-assist/wordle-assist.log`, if the platform has one.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE_NAME))
}

/// Default filter for a `-v` count; `RUST_LOG` still wins.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global logger. Call once, before any logging.
pub fn init(verbosity: u8, destination: &LogDestination) -> io::Result<()> {
    let target = match destination {
        LogDestination::Disabled => return Ok(()),
        LogDestination::Stderr => Target::Stderr,
        LogDestination::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Target::Pipe(Box::new(file))
        }
    };

    Builder::from_env(Env::default().default_filter_or(level_for_verbosity(verbosity)))
        .target(target)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(io::Error::other)
}
