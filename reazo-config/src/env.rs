// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Separator marking a nested key inside a variable name:
/// `REAZO_VALIDATION__OCCURRENCE_MODE` maps to `validation.occurrence_mode`.
pub const NESTING_SEPARATOR: &str = "__";

/// Reads (optionally prefixed) environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::new(Some(prefix.into()))
    }

    /// Variables matching the prefix, keyed by dotted lower-case path
    pub fn load(&self) -> HashMap<String, String> {
        self.collect(env::vars())
    }

    fn collect(&self, vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
        vars.filter_map(|(key, value)| {
            let rest = match &self.prefix {
                Some(prefix) => key.strip_prefix(prefix.as_str())?.strip_prefix('_')?,
                None => key.as_str(),
            };
            if rest.is_empty() {
                return None;
            }
            Some((key_path(rest), value))
        })
        .collect()
    }

    /// One variable, the prefix applied
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Variable name for a dotted key
    pub fn full_key(&self, key: &str) -> String {
        let name = key.replace('.', NESTING_SEPARATOR).to_ascii_uppercase();
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, name),
            None => name,
        }
    }
}

fn key_path(name: &str) -> String {
    name.split(NESTING_SEPARATOR)
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Iterator<Item = (String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_prefix_filters_and_nests() {
        let loader = EnvLoader::with_prefix("REAZO");
        let loaded = loader.collect(vars(&[
            ("REAZO_VALIDATION__OCCURRENCE_MODE", "consecutive"),
            ("REAZO_DEBUG", "1"),
            ("REAZOX_OTHER", "no"),
            ("PATH", "/bin"),
        ]));

        assert_eq!(loaded.get("validation.occurrence_mode").map(String::as_str), Some("consecutive"));
        assert_eq!(loaded.get("debug").map(String::as_str), Some("1"));
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_no_prefix_keeps_everything() {
        let loader = EnvLoader::default();
        let loaded = loader.collect(vars(&[("HOME", "/root")]));
        assert_eq!(loaded.get("home").map(String::as_str), Some("/root"));
    }

    #[test]
    fn test_full_key() {
        let loader = EnvLoader::with_prefix("REAZO");
        assert_eq!(
            loader.full_key("validation.occurrence_mode"),
            "REAZO_VALIDATION__OCCURRENCE_MODE"
        );
        assert_eq!(EnvLoader::default().full_key("debug"), "DEBUG");
    }

    #[test]
    fn test_missing_var_uses_default() {
        let loader = EnvLoader::with_prefix("REAZO_TEST_ABSENT");
        assert!(loader.load_var("NOTHING_HERE_4821").is_err());
        assert_eq!(loader.load_var_or("NOTHING_HERE_4821", "fallback"), "fallback");
    }
}
