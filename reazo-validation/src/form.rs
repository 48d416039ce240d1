// Form-level validation

use crate::traits::FormSnapshot;
use crate::{Engine, Result, Validator, ValidatorList};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

const TARGET: &str = "reazo::forms";

static NULL: Value = Value::Null;

/// Validation rule for one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validators: Option<ValidatorList>,
}

impl FieldRule {
    pub fn required() -> Self {
        Self {
            required: true,
            validators: None,
        }
    }

    pub fn optional() -> Self {
        Self::default()
    }

    /// Append a validator.
    pub fn with(mut self, validator: Validator) -> Self {
        self.validators.get_or_insert_with(ValidatorList::new).push(validator);
        self
    }

    pub fn with_validators(mut self, validators: impl Into<ValidatorList>) -> Self {
        self.validators = Some(validators.into());
        self
    }
}

/// Field rules in evaluation order.
///
/// ```
/// use reazo_validation::{FieldRule, FieldRules, Validator};
///
/// let rules = FieldRules::new()
///     .field("username", FieldRule::required())
///     .field("age", FieldRule::optional().with(Validator::Integer));
///
/// assert_eq!(rules.names().collect::<Vec<_>>(), ["username", "age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRules {
    entries: Vec<(String, FieldRule)>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `name`. A replaced rule keeps its position.
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = rule,
            None => self.entries.push((name, rule)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, rule)| rule)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.entries.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldRule)> for FieldRules {
    fn from_iter<I: IntoIterator<Item = (K, FieldRule)>>(iter: I) -> Self {
        let mut rules = Self::new();
        for (name, rule) in iter {
            rules.insert(name, rule);
        }
        rules
    }
}

impl Serialize for FieldRules {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, rule) in &self.entries {
            map.serialize_entry(name, rule)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        ordered_entries(deserializer).map(|entries| entries.into_iter().collect())
    }
}

/// Object entries in document order, each value deserialized as `V`.
fn ordered_entries<'de, D, V>(deserializer: D) -> std::result::Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: serde::de::DeserializeOwned,
{
    let map = Map::<String, Value>::deserialize(deserializer)?;
    map.into_iter()
        .map(|(name, raw)| {
            V::deserialize(raw)
                .map(|parsed| (name.clone(), parsed))
                .map_err(|e| D::Error::custom(format!("field `{}`: {}", name, e)))
        })
        .collect()
}

/// Form entry carrying its value and its rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatedField {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub validation: FieldRule,
}

impl ValidatedField {
    pub fn new(value: impl Into<Value>, validation: FieldRule) -> Self {
        Self {
            value: value.into(),
            validation,
        }
    }
}

/// Self-describing form: each field holds its value and rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationForm {
    entries: Vec<(String, ValidatedField)>,
}

impl ValidationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, field: ValidatedField) -> Self {
        self.insert(name, field);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, field: ValidatedField) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = field,
            None => self.entries.push((name, field)),
        }
    }

    /// Replace a field's value, keeping its rule.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, field)) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ValidatedField> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, field)| field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidatedField)> {
        self.entries.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ValidationForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, field) in &self.entries {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValidationForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = ordered_entries(deserializer)?;
        Ok(Self { entries })
    }
}

/// Stored state of one form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    #[serde(default)]
    pub value: Value,
}

/// Field states keyed by name, as a form store keeps them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    pub fields: BTreeMap<String, FieldState>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_value(name, value);
        self
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.entry(name.into()).or_default().value = value.into();
    }
}

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidField {
    pub field: String,
    pub value: Value,
}

/// Outcome of [`Engine::check_form`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormReport {
    invalid: Vec<InvalidField>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Invalid fields in rule order.
    pub fn invalid_fields(&self) -> &[InvalidField] {
        &self.invalid
    }

    pub fn contains(&self, field: &str) -> bool {
        self.invalid.iter().any(|invalid| invalid.field == field)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "valid": self.is_valid(),
            "invalid": self.invalid,
        })
    }
}

impl Engine {
    /// Validate every field in `rules` against its value in `values`.
    ///
    /// Fields missing from `values` are validated as `null`. All fields are
    /// evaluated; `on_invalid(name, value, false)` runs once for each one that
    /// fails, in rule order.
    pub fn validate_form<S, F>(&self, values: &S, rules: &FieldRules, mut on_invalid: F) -> Result<bool>
    where
        S: FormSnapshot + ?Sized,
        F: FnMut(&str, &Value, bool),
    {
        let mut form_valid = true;
        for (name, rule) in rules.iter() {
            let value = values.field_value(name).unwrap_or(&NULL);
            if !self.validate_field(name, value, rule)? {
                form_valid = false;
                on_invalid(name, value, false);
            }
        }
        Ok(form_valid)
    }

    /// Validate a self-describing form, in field order.
    pub fn validate_validation_form<F>(&self, form: &ValidationForm, mut on_invalid: F) -> Result<bool>
    where
        F: FnMut(&str, &Value, bool),
    {
        let mut form_valid = true;
        for (name, field) in form.iter() {
            if !self.validate_field(name, &field.value, &field.validation)? {
                form_valid = false;
                on_invalid(name, &field.value, false);
            }
        }
        Ok(form_valid)
    }

    /// Validate and collect the failures instead of reporting them.
    pub fn check_form<S>(&self, values: &S, rules: &FieldRules) -> Result<FormReport>
    where
        S: FormSnapshot + ?Sized,
    {
        let mut report = FormReport::default();
        self.validate_form(values, rules, |field, value, _| {
            report.invalid.push(InvalidField {
                field: field.to_string(),
                value: value.clone(),
            });
        })?;
        Ok(report)
    }

    /// Check a single field as it is edited. Fields without a rule pass.
    pub fn validate_field_change(&self, rules: &FieldRules, field: &str, value: &Value) -> Result<bool> {
        match rules.get(field) {
            Some(rule) => self.validate_field(field, value, rule),
            None => Ok(true),
        }
    }

    fn validate_field(&self, name: &str, value: &Value, rule: &FieldRule) -> Result<bool> {
        let valid = self.validate(value, rule.required, rule.validators.as_ref())?;
        if !valid {
            reazo_log::debug!(target: TARGET, "field {} is invalid", name);
        }
        Ok(valid)
    }
}
