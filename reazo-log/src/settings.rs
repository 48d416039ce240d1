//! Logging settings read from the environment.

use crate::{Format, Level};
use std::env;

/// Environment variable enabling debug output (`1` or `true`).
pub const ENV_DEBUG: &str = "REAZO_DEBUG";
/// Environment variable selecting the minimum level.
pub const ENV_LEVEL: &str = "REAZO_LOG_LEVEL";
/// Environment variable selecting the output format.
pub const ENV_FORMAT: &str = "REAZO_LOG_FORMAT";
/// Environment variable toggling colors.
pub const ENV_COLOR: &str = "REAZO_LOG_COLOR";
/// Environment variable toggling timestamps.
pub const ENV_TIMESTAMPS: &str = "REAZO_LOG_TIMESTAMPS";

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub color: bool,
    pub timestamps: bool,
    /// Print the record target (module path)
    pub target: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            color: false,
            timestamps: true,
            target: true,
        }
    }
}

impl LogSettings {
    /// Read settings from `REAZO_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let debug = lookup(ENV_DEBUG).map(|v| truthy(&v)).unwrap_or(false);

        let level = lookup(ENV_LEVEL)
            .and_then(|v| v.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = lookup(ENV_FORMAT)
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.format);

        let color = lookup(ENV_COLOR)
            .map(|v| truthy(&v))
            .unwrap_or_else(|| lookup("NO_COLOR").is_none() && lookup("TERM").is_some());

        let timestamps = lookup(ENV_TIMESTAMPS)
            .map(|v| truthy(&v))
            .unwrap_or(defaults.timestamps);

        Self {
            debug,
            level,
            format,
            color,
            timestamps,
            target: defaults.target,
        }
    }
}

fn truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let settings = LogSettings::from_lookup(lookup(&[]));
        assert!(!settings.debug);
        assert_eq!(settings.level, Level::Info);
        assert_eq!(settings.format, Format::Json);
        assert!(!settings.color);
    }

    #[test]
    fn test_debug_lowers_default_level() {
        let settings = LogSettings::from_lookup(lookup(&[(ENV_DEBUG, "true")]));
        assert!(settings.debug);
        assert_eq!(settings.level, Level::Debug);
    }

    #[test]
    fn test_explicit_level_wins_over_debug() {
        let settings =
            LogSettings::from_lookup(lookup(&[(ENV_DEBUG, "1"), (ENV_LEVEL, "error")]));
        assert_eq!(settings.level, Level::Error);
    }

    #[test]
    fn test_format_and_flags() {
        let settings = LogSettings::from_lookup(lookup(&[
            (ENV_FORMAT, "compact"),
            (ENV_COLOR, "0"),
            (ENV_TIMESTAMPS, "false"),
        ]));
        assert_eq!(settings.format, Format::Compact);
        assert!(!settings.color);
        assert!(!settings.timestamps);
    }

    #[test]
    fn test_color_follows_terminal_when_unset() {
        let settings = LogSettings::from_lookup(lookup(&[("TERM", "xterm")]));
        assert!(settings.color);

        let settings = LogSettings::from_lookup(lookup(&[("TERM", "xterm"), ("NO_COLOR", "1")]));
        assert!(!settings.color);
    }
}
