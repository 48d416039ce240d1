// Configuration file loading

use crate::{ConfigError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }

    /// Detect the format of `path` from its extension.
    ///
    /// A bare `.env` file has no extension in the `Path` sense and is
    /// recognized by name.
    pub fn detect(path: &Path) -> Result<Self> {
        if path.file_name().and_then(|n| n.to_str()) == Some(".env") {
            return Ok(FileFormat::Env);
        }

        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        Self::from_extension(ext).ok_or_else(|| ConfigError::UnsupportedFormat(ext.to_string()))
    }

    fn name(&self) -> &'static str {
        match self {
            FileFormat::Json => "JSON",
            FileFormat::Toml => "TOML",
            FileFormat::Env => "env",
        }
    }
}

/// Parses configuration sources into a JSON tree
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Loader for the format implied by `path`
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        FileFormat::detect(path.as_ref()).map(Self::new)
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Read and parse a file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("failed to read {}: {}", path.display(), e))
        })?;

        reazo_log::debug!(
            target: "reazo::config",
            "loaded {} bytes from {}",
            content.len(),
            path.display()
        );

        self.parse(&content)
    }

    /// Parse already-read content
    pub fn parse(&self, content: &str) -> Result<Value> {
        match self.format {
            FileFormat::Json => serde_json::from_str(content).map_err(|e| self.parse_error(e)),
            FileFormat::Toml => {
                let table: toml::Table = toml::from_str(content).map_err(|e| self.parse_error(e))?;
                serde_json::to_value(table).map_err(|e| self.parse_error(e))
            }
            FileFormat::Env => Ok(parse_env(content)),
        }
    }

    fn parse_error(&self, err: impl std::fmt::Display) -> ConfigError {
        ConfigError::ParseError {
            format: self.format.name(),
            message: err.to_string(),
        }
    }
}

/// `KEY=value` lines; blank lines and `#` comments are skipped, surrounding
/// quotes are stripped. Keys are kept verbatim.
fn parse_env(content: &str) -> Value {
    let mut map = Map::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            map.insert(key.trim().to_string(), Value::String(value.to_string()));
        }
    }

    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_keeps_key_order() {
        let loader = ConfigLoader::new(FileFormat::Json);
        let value = loader.parse(r#"{"zeta": 1, "alpha": 2}"#).unwrap();

        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_toml_tables() {
        let loader = ConfigLoader::new(FileFormat::Toml);
        let value = loader
            .parse(
                r#"
                [validation]
                occurrence_mode = "consecutive"

                [password_complexity]
                minLength = 8
                "#,
            )
            .unwrap();

        assert_eq!(value["validation"]["occurrence_mode"], "consecutive");
        assert_eq!(value["password_complexity"]["minLength"], 8);
    }

    #[test]
    fn test_parse_env_lines() {
        let loader = ConfigLoader::new(FileFormat::Env);
        let value = loader
            .parse(
                r#"
                # comment
                REAZO_MODE=total
                export QUOTED="two words"
                SINGLE='x'
                "#,
            )
            .unwrap();

        assert_eq!(value["REAZO_MODE"], "total");
        assert_eq!(value["QUOTED"], "two words");
        assert_eq!(value["SINGLE"], "x");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let loader = ConfigLoader::new(FileFormat::Json);
        let err = loader.parse("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { format: "JSON", .. }));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("JSON"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("yaml"), None);
        assert_eq!(FileFormat::detect(Path::new("forms.toml")).unwrap(), FileFormat::Toml);
        assert_eq!(FileFormat::detect(Path::new("/app/.env")).unwrap(), FileFormat::Env);
        assert!(FileFormat::detect(Path::new("README")).is_err());
    }
}
