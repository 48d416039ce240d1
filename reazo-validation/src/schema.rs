// Loading rules and engine options from configuration

use crate::complexity::PasswordComplexity;
use crate::forms::change_password_rules;
use crate::{Engine, EngineOptions, FieldRules, Result, ValidationError};
use reazo_config::{ConfigLoader, ConfigManager, FileFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

const TARGET: &str = "reazo::schema";

/// Environment variable overriding [`EngineOptions::occurrence_mode`].
pub const ENV_OCCURRENCE_MODE: &str = "REAZO_VALIDATION_OCCURRENCE_MODE";

/// Configuration section holding [`EngineOptions`].
pub const SECTION: &str = "validation";

impl EngineOptions {
    /// Options from the `validation` section of `config`, then
    /// `REAZO_VALIDATION_OCCURRENCE_MODE` if it is set.
    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        let options: EngineOptions = config.get_opt(SECTION)?.unwrap_or_default();
        options.with_env_overrides(|key| std::env::var(key).ok())
    }

    fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_OCCURRENCE_MODE) {
            self.occurrence_mode = mode.parse().map_err(|reason: String| {
                reazo_log::warn!(target: TARGET, "invalid occurrence mode override: {}", reason);
                ValidationError::Schema(format!("{}: {}", ENV_OCCURRENCE_MODE, reason))
            })?;
        }
        Ok(self)
    }
}

/// Named forms with an optional password policy.
///
/// ```toml
/// [validation]
/// occurrence_mode = "total"
///
/// [password_complexity]
/// minLength = 8
///
/// [forms.login]
/// username = { required = true }
/// password = { required = true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub validation: EngineOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_complexity: Option<PasswordComplexity>,
    #[serde(default)]
    pub forms: BTreeMap<String, FieldRules>,
}

impl FormSchema {
    /// Read a JSON or TOML schema file, format chosen by extension.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = ConfigLoader::auto(path)?.load_file(path)?;
        let schema = Self::from_value(raw)?;
        reazo_log::info!(target: TARGET, "loaded {} forms from {}", schema.forms.len(), path.display());
        Ok(schema)
    }

    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        Self::from_value(ConfigLoader::new(format).parse(content)?)
    }

    /// Schema stored at the root of `config`.
    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        config.section("").map_err(ValidationError::from)
    }

    fn from_value(raw: Value) -> Result<Self> {
        serde_json::from_value(raw).map_err(|e| {
            reazo_log::warn!(target: TARGET, "invalid form schema: {}", e);
            ValidationError::Schema(e.to_string())
        })
    }

    pub fn rules(&self, form: &str) -> Option<&FieldRules> {
        self.forms.get(form)
    }

    pub fn form_names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    /// Password-change rules under this schema's policy.
    pub fn change_password_rules(&self, new_password: &str) -> FieldRules {
        change_password_rules(self.password_complexity.as_ref(), new_password)
    }

    pub fn engine(&self) -> Engine {
        Engine::with_options(self.validation)
    }
}
