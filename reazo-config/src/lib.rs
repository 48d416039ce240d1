//! Layered configuration for Reazo.
//!
//! Values from files (JSON, TOML, `.env`) and environment variables are
//! merged into one JSON tree, later sources overriding earlier ones.
//! Keys are dotted paths into that tree (`validation.occurrence_mode`).
//!
//! ```
//! use reazo_config::{ConfigManager, FileFormat};
//!
//! let mut config = ConfigManager::new();
//! config
//!     .load_str(r#"{"validation": {"occurrence_mode": "total"}}"#, FileFormat::Json)
//!     .unwrap();
//!
//! let mode: String = config.get("validation.occurrence_mode").unwrap();
//! assert_eq!(mode, "total");
//! ```

pub mod env;
pub mod error;
pub mod loader;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

/// Merged configuration tree
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    root: Map<String, Value>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager whose environment layer only reads `PREFIX_*` variables
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            root: Map::new(),
            env_prefix: Some(prefix.into()),
        }
    }

    /// Merge a file, format detected from its extension
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let value = ConfigLoader::auto(path.as_ref())?.load_file(path.as_ref())?;
        self.merge_value(value)?;
        Ok(self)
    }

    /// Merge content of a known format
    pub fn load_str(&mut self, content: &str, format: FileFormat) -> Result<&mut Self> {
        let value = ConfigLoader::new(format).parse(content)?;
        self.merge_value(value)?;
        Ok(self)
    }

    /// Merge environment variables (prefix applied)
    pub fn load_env(&mut self) -> Result<&mut Self> {
        let vars = EnvLoader::new(self.env_prefix.clone()).load();
        let mut keys: Vec<_> = vars.keys().cloned().collect();
        keys.sort();
        for key in keys {
            if let Some(value) = vars.get(&key) {
                self.insert(&key, Value::String(value.clone()));
            }
        }
        Ok(self)
    }

    /// Read a `.env` file into the process environment, then merge the
    /// environment. A missing default `.env` is not an error.
    pub fn load_dotenv(&mut self, path: Option<&Path>) -> Result<&mut Self> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                if dotenvy::dotenv().is_err() {
                    reazo_log::debug!(target: "reazo::config", "no .env file found");
                }
            }
        }
        self.load_env()
    }

    /// Set a value at a dotted path
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.insert(key, value);
        Ok(())
    }

    /// Raw value at a dotted path
    pub fn value(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.root.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Typed value at a dotted path
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .value(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value.clone()).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Typed value for a key that may be absent; present-but-invalid is an error
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::KeyNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Deserialize an entire table; the whole tree when `key` is empty
    pub fn section<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        if key.is_empty() {
            return serde_json::from_value(Value::Object(self.root.clone())).map_err(|e| {
                ConfigError::InvalidValue {
                    key: "<root>".to_string(),
                    message: e.to_string(),
                }
            });
        }
        self.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Top-level keys, in load order
    pub fn keys(&self) -> Vec<String> {
        self.root.keys().cloned().collect()
    }

    /// Overlay another manager onto this one
    pub fn merge(&mut self, other: &ConfigManager) {
        merge_objects(&mut self.root, &other.root);
    }

    fn merge_value(&mut self, value: Value) -> Result<()> {
        match value {
            Value::Object(map) => {
                merge_objects(&mut self.root, &map);
                Ok(())
            }
            other => Err(ConfigError::InvalidValue {
                key: "<root>".to_string(),
                message: format!("expected a table, found {}", type_name(&other)),
            }),
        }
    }

    fn insert(&mut self, key: &str, value: Value) {
        let parts: Vec<&str> = key.split('.').collect();
        let (last, parents) = match parts.split_last() {
            Some(split) => split,
            None => return,
        };

        let mut current = &mut self.root;
        for part in parents {
            let entry = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
        current.insert(last.to_string(), value);
    }
}

fn merge_objects(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_objects(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}
