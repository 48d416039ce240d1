//! Record rendering and output.

use crate::{Format, Level, LogSettings};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::io::Write as _;

/// Render one record to a single line (without the trailing newline).
pub fn render(
    level: Level,
    target: &str,
    message: &str,
    settings: &LogSettings,
    at: DateTime<Utc>,
) -> String {
    match settings.format {
        Format::Pretty => render_pretty(level, target, message, settings, at),
        Format::Compact => render_compact(level, target, message, settings, at),
        Format::Json => render_json(level, target, message, at),
    }
}

/// Write a record to stderr.
pub(crate) fn write(level: Level, target: &str, message: &str, settings: &LogSettings) {
    let line = render(level, target, message, settings, Utc::now());
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", line);
}

fn render_pretty(
    level: Level,
    target: &str,
    message: &str,
    settings: &LogSettings,
    at: DateTime<Utc>,
) -> String {
    let mut line = String::new();

    if settings.timestamps {
        let _ = write!(line, "{} ", at.format("%Y-%m-%d %H:%M:%S%.3f"));
    }

    #[cfg(feature = "color")]
    if settings.color {
        let _ = write!(line, "{:5} ", level.colored());
    } else {
        let _ = write!(line, "{:5} ", level.as_str());
    }

    #[cfg(not(feature = "color"))]
    let _ = write!(line, "{:5} ", level.as_str());

    if settings.target && !target.is_empty() {
        let _ = write!(line, "[{}] ", target);
    }

    line.push_str(message);
    line
}

fn render_compact(
    level: Level,
    target: &str,
    message: &str,
    settings: &LogSettings,
    at: DateTime<Utc>,
) -> String {
    let mut line = String::new();

    if settings.timestamps {
        let _ = write!(line, "{} ", at.format("%H:%M:%S"));
    }

    line.push(level.as_str().chars().next().unwrap_or('?'));
    line.push(' ');

    if settings.target && !target.is_empty() {
        let _ = write!(line, "{}: ", target);
    }

    line.push_str(message);
    line
}

#[cfg(feature = "json")]
fn render_json(level: Level, target: &str, message: &str, at: DateTime<Utc>) -> String {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Entry<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let entry = Entry {
        timestamp: at.to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    serde_json::to_string(&entry).unwrap_or_default()
}

#[cfg(not(feature = "json"))]
fn render_json(level: Level, target: &str, message: &str, at: DateTime<Utc>) -> String {
    format!(
        r#"{{"timestamp":"{}","level":"{}","target":"{}","message":"{}"}}"#,
        at.to_rfc3339(),
        level.as_str(),
        escape(target),
        escape(message)
    )
}

#[cfg(not(feature = "json"))]
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
