//! Log levels.

use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Disables all output
    Off = 5,
}

impl Level {
    /// Upper-case name used in rendered records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }

    /// Matching filter for the `log` facade.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Level::Trace => log::LevelFilter::Trace,
            Level::Debug => log::LevelFilter::Debug,
            Level::Info => log::LevelFilter::Info,
            Level::Warn => log::LevelFilter::Warn,
            Level::Error => log::LevelFilter::Error,
            Level::Off => log::LevelFilter::Off,
        }
    }

    /// Colored level name (requires the `color` feature).
    #[cfg(feature = "color")]
    pub fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => self.as_str().magenta(),
            Level::Debug => self.as_str().blue(),
            Level::Info => self.as_str().green(),
            Level::Warn => self.as_str().yellow(),
            Level::Error => self.as_str().red().bold(),
            Level::Off => self.as_str().white(),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Level::Trace,
            log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warn,
            log::Level::Error => Level::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format of rendered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Timestamp, padded level, bracketed target
    Pretty,
    /// Short time, level initial
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
        assert_eq!(" WARNING ".parse::<Level>(), Ok(Level::Warn));
        assert_eq!("none".parse::<Level>(), Ok(Level::Off));
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_roundtrips_through_u8() {
        for level in [Level::Trace, Level::Debug, Level::Info, Level::Warn, Level::Error, Level::Off] {
            assert_eq!(Level::from_u8(level as u8), level);
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<Format>(), Ok(Format::Json));
        assert_eq!("Pretty".parse::<Format>(), Ok(Format::Pretty));
        assert!("xml".parse::<Format>().is_err());
    }

    #[test]
    fn test_log_facade_mapping() {
        assert_eq!(Level::from(log::Level::Warn), Level::Warn);
        assert_eq!(Level::Off.to_level_filter(), log::LevelFilter::Off);
    }
}
