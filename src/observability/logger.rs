//! Colored console logger.

use colored::Colorize;
use std::fmt;
use std::str::FromStr;

/// Logging severity, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Diagnostic output, hidden by default.
    Debug,
    /// Normal progress output.
    Info,
    /// Something odd but recoverable.
    Warn,
    /// A failure worth surfacing.
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        write!(f, "{label}")
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

/// Console logger with an origin tag and version prefix.
///
/// Output format: `[ORIGIN][v0.3.2] message`, origin in green, version
/// dimmed. Errors and warnings go to stderr, everything else to stdout.
/// Debug lines additionally carry a local `HH:MM:SS` timestamp.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    origin: String,
    level: LogLevel,
}

impl ConsoleLogger {
    /// Create a logger with the given origin tag at the default level.
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_level(origin, LogLevel::default())
    }

    /// Create a logger with an explicit minimum level.
    pub fn with_level(origin: impl Into<String>, level: LogLevel) -> Self {
        Self {
            origin: origin.into(),
            level,
        }
    }

    /// A copy of this logger with a different origin tag.
    ///
    /// Used by capabilities that log under their own name while sharing
    /// the program-wide level.
    pub fn scoped(&self, origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            level: self.level,
        }
    }

    /// Whether a message at this level would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn prefix(&self) -> String {
        format!(
            "{}{}",
            format!("[{}]", self.origin).green().bold(),
            format!("[v{}]", env!("CARGO_PKG_VERSION")).dimmed(),
        )
    }

    /// Log a message at the given level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Debug => {
                let stamp = chrono::Local::now().format("%H:%M:%S");
                println!("{} {} {}", self.prefix(), format!("[{stamp}]").dimmed(), message.dimmed());
            }
            LogLevel::Info => println!("{} {}", self.prefix(), message),
            LogLevel::Warn => eprintln!("{} {}", self.prefix(), message.yellow()),
            LogLevel::Error => eprintln!("{} {}", self.prefix(), message.red().bold()),
        }
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Log at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_filtering() {
        let logger = ConsoleLogger::with_level("TEST", LogLevel::Warn);
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(!logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Warn));
        assert!(logger.enabled(LogLevel::Error));
    }

    #[test]
    fn test_scoped_keeps_level() {
        let logger = ConsoleLogger::with_level("CRK", LogLevel::Debug);
        let scoped = logger.scoped("repository");
        assert!(scoped.enabled(LogLevel::Debug));
    }
}
