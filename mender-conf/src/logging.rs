//! The logging side effects of the command line.
//!
//! Messages are emitted through the [`log`] facade.  [`ProcessLogger`]
//! installs [`env_logger`] as the backend, other [`Logger`] implementations
//! can be swapped in (tests record the calls instead).
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use log::LevelFilter;

use crate::error::{Error, Result};

/// Severity levels understood on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Fatal,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The [`log`] filter that lets messages of this level through.
    ///
    /// The facade has no fatal level, fatal messages are logged as errors.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Fatal | LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<LogLevel> {
        match s {
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(Error::InvalidLogLevel(s.to_string())),
        }
    }
}

/// Translates a level name from the command line.
pub fn string_to_log_level(s: &str) -> Result<LogLevel> {
    s.parse()
}

/// The logging collaborator of the bootstrap.
pub trait Logger {
    /// Sends log output to `path` instead of stderr.
    fn setup_file_logging(&mut self, path: &Path, append: bool) -> Result<()>;

    /// Applies `level` process wide.
    fn set_level(&mut self, level: LogLevel);
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// The output of the installed backend.  `None` if another logger owns
/// the facade.
static BACKEND: OnceLock<Option<SharedWriter>> = OnceLock::new();

/// Forwards everything to whatever writer is currently in the slot.
struct SwitchableTarget(SharedWriter);

fn lock(writer: &SharedWriter) -> MutexGuard<'_, Box<dyn Write + Send>> {
    writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Write for SwitchableTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.0).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        lock(&self.0).flush()
    }
}

fn backend() -> Option<&'static SharedWriter> {
    BACKEND
        .get_or_init(|| {
            let stderr: Box<dyn Write + Send> = Box::new(io::stderr());
            let writer: SharedWriter = Arc::new(Mutex::new(stderr));
            let mut builder = env_logger::Builder::new();
            // the facade's max level does the filtering
            builder.filter_level(LevelFilter::Trace);
            builder.target(env_logger::Target::Pipe(Box::new(SwitchableTarget(
                writer.clone(),
            ))));
            match builder.try_init() {
                Ok(()) => {
                    log::set_max_level(LogLevel::default().to_level_filter());
                    Some(writer)
                }
                Err(_) => None,
            }
        })
        .as_ref()
}

/// Logs through [`env_logger`] to stderr or to a file.
///
/// The backend is installed process wide on first use and shared by all
/// instances.  Setting up file logging redirects its output, also after
/// messages were already logged.  If some other logger owns the [`log`]
/// facade, file logging fails and only the level is applied.
#[derive(Debug, Default)]
pub struct ProcessLogger {
    _private: (),
}

impl ProcessLogger {
    pub fn new() -> ProcessLogger {
        ProcessLogger::default()
    }
}

impl Logger for ProcessLogger {
    fn setup_file_logging(&mut self, path: &Path, append: bool) -> Result<()> {
        let log_file_error = |source: io::Error| Error::LogFile {
            path: path.to_path_buf(),
            source,
        };
        let writer = backend().ok_or_else(|| {
            log_file_error(io::Error::new(
                io::ErrorKind::Other,
                "another logger is already installed",
            ))
        })?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(log_file_error)?;
        let mut current = lock(writer);
        current.flush().ok();
        *current = Box::new(file);
        Ok(())
    }

    fn set_level(&mut self, level: LogLevel) {
        backend();
        log::set_max_level(level.to_level_filter());
    }
}

#[cfg(test)]
mod test {
    use super::{string_to_log_level, LogLevel};
    use log::LevelFilter;
    use test_log::test;

    #[test]
    fn test_parse_levels() {
        for level in [
            LogLevel::Fatal,
            LogLevel::Error,
            LogLevel::Warning,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert_eq!(string_to_log_level(level.as_str()).unwrap(), level);
        }
        assert_eq!(string_to_log_level("warn").unwrap(), LogLevel::Warning);
    }

    #[test]
    fn test_parse_invalid_level() {
        let err = string_to_log_level("verbose").unwrap_err();
        assert_eq!(err.to_string(), "'verbose' is not a recognized log level");
        assert!(string_to_log_level("INFO").is_err());
        assert!(string_to_log_level("").is_err());
    }

    #[test]
    fn test_default_level() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert_eq!(LogLevel::default().to_string(), "info");
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(LogLevel::Fatal.to_level_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warning.to_level_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
    }
}
