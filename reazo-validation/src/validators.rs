// Validator descriptors

use crate::compare::{CompareDataType, CompareOperator, CompareOptions};
use crate::patterns::Pattern;
use crate::{Result, ValidationError};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::fmt;

/// Rule family of a validator, with its wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    Integer,
    Number,
    Date,
    RegularExpression,
    MinimumLength,
    ContainsLowerCase,
    ContainsUpperCase,
    ContainsInteger,
    ContainsNonAlphaNumeric,
    Compare,
    GooglePlaceResult,
    ScriptLocation,
    ExcludesUsername,
}

impl ValidatorKind {
    pub const ALL: [ValidatorKind; 13] = [
        ValidatorKind::Integer,
        ValidatorKind::Number,
        ValidatorKind::Date,
        ValidatorKind::RegularExpression,
        ValidatorKind::MinimumLength,
        ValidatorKind::ContainsLowerCase,
        ValidatorKind::ContainsUpperCase,
        ValidatorKind::ContainsInteger,
        ValidatorKind::ContainsNonAlphaNumeric,
        ValidatorKind::Compare,
        ValidatorKind::GooglePlaceResult,
        ValidatorKind::ScriptLocation,
        ValidatorKind::ExcludesUsername,
    ];

    /// Tag used in serialized descriptors.
    ///
    /// Upper case keeps its historical hyphen (`CONTAINS_UPPER-CASE`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::Integer => "INTEGER",
            ValidatorKind::Number => "NUMBER",
            ValidatorKind::Date => "DATE",
            ValidatorKind::RegularExpression => "REGULAR_EXPRESSION",
            ValidatorKind::MinimumLength => "MINIMUM_LENGTH",
            ValidatorKind::ContainsLowerCase => "CONTAINS_LOWER_CASE",
            ValidatorKind::ContainsUpperCase => "CONTAINS_UPPER-CASE",
            ValidatorKind::ContainsInteger => "CONTAINS_INTEGER",
            ValidatorKind::ContainsNonAlphaNumeric => "CONTAINS_NON_ALPHA_NUMERIC",
            ValidatorKind::Compare => "COMPARE",
            ValidatorKind::GooglePlaceResult => "GOOGLE_PLACE_RESULT",
            ValidatorKind::ScriptLocation => "SCRIPT_LOCATION",
            ValidatorKind::ExcludesUsername => "EXCLUDES_USERNAME",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag == "CONTAINS_UPPER_CASE" {
            return Some(ValidatorKind::ContainsUpperCase);
        }
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation rule.
///
/// ```
/// use reazo_validation::Validator;
///
/// let rule: Validator = serde_json::from_str(
///     r#"{"type": "MINIMUM_LENGTH", "options": {"length": 8}}"#,
/// ).unwrap();
/// assert_eq!(rule, Validator::MinimumLength { length: 8 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    Integer,
    Number,
    Date,
    RegularExpression(Pattern),
    MinimumLength { length: usize },
    ContainsLowerCase { occurrences: usize },
    ContainsUpperCase { occurrences: usize },
    ContainsInteger { occurrences: usize },
    ContainsNonAlphaNumeric { occurrences: usize },
    Compare(CompareOptions),
    GooglePlaceResult,
    ScriptLocation,
    /// Rejects values containing the username (ASCII case-insensitive)
    ExcludesUsername { username: String },
}

impl Validator {
    pub fn kind(&self) -> ValidatorKind {
        match self {
            Validator::Integer => ValidatorKind::Integer,
            Validator::Number => ValidatorKind::Number,
            Validator::Date => ValidatorKind::Date,
            Validator::RegularExpression(_) => ValidatorKind::RegularExpression,
            Validator::MinimumLength { .. } => ValidatorKind::MinimumLength,
            Validator::ContainsLowerCase { .. } => ValidatorKind::ContainsLowerCase,
            Validator::ContainsUpperCase { .. } => ValidatorKind::ContainsUpperCase,
            Validator::ContainsInteger { .. } => ValidatorKind::ContainsInteger,
            Validator::ContainsNonAlphaNumeric { .. } => ValidatorKind::ContainsNonAlphaNumeric,
            Validator::Compare(_) => ValidatorKind::Compare,
            Validator::GooglePlaceResult => ValidatorKind::GooglePlaceResult,
            Validator::ScriptLocation => ValidatorKind::ScriptLocation,
            Validator::ExcludesUsername { .. } => ValidatorKind::ExcludesUsername,
        }
    }

    /// `REGULAR_EXPRESSION` validator from pattern source.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Pattern::new(pattern).map(Validator::RegularExpression)
    }

    /// Build a validator from a wire tag and its options.
    pub fn from_parts(tag: &str, options: Option<&Value>) -> Result<Self> {
        let kind = ValidatorKind::from_tag(tag)
            .ok_or_else(|| ValidationError::UnknownValidatorKind(tag.to_string()))?;
        let options = options.filter(|o| !o.is_null());

        Ok(match kind {
            ValidatorKind::Integer => Validator::Integer,
            ValidatorKind::Number => Validator::Number,
            ValidatorKind::Date => Validator::Date,
            ValidatorKind::GooglePlaceResult => Validator::GooglePlaceResult,
            ValidatorKind::ScriptLocation => Validator::ScriptLocation,
            ValidatorKind::RegularExpression => match options {
                Some(Value::String(source)) => Validator::pattern(source)?,
                _ => return Err(invalid(kind, "expected a pattern string")),
            },
            ValidatorKind::MinimumLength => Validator::MinimumLength {
                length: count_option(kind, options, "length", 0)?,
            },
            ValidatorKind::ContainsLowerCase => Validator::ContainsLowerCase {
                occurrences: count_option(kind, options, "occurrences", 1)?,
            },
            ValidatorKind::ContainsUpperCase => Validator::ContainsUpperCase {
                occurrences: count_option(kind, options, "occurrences", 1)?,
            },
            ValidatorKind::ContainsInteger => Validator::ContainsInteger {
                occurrences: count_option(kind, options, "occurrences", 1)?,
            },
            ValidatorKind::ContainsNonAlphaNumeric => Validator::ContainsNonAlphaNumeric {
                occurrences: count_option(kind, options, "occurrences", 1)?,
            },
            ValidatorKind::Compare => Validator::Compare(compare_options(options)?),
            ValidatorKind::ExcludesUsername => {
                let username = options
                    .and_then(|o| o.get("username"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid(kind, "expected a username string"))?;
                Validator::ExcludesUsername {
                    username: username.to_string(),
                }
            }
        })
    }

    /// Options in wire form, `None` for kinds without options.
    pub fn options(&self) -> Option<Value> {
        match self {
            Validator::Integer
            | Validator::Number
            | Validator::Date
            | Validator::GooglePlaceResult
            | Validator::ScriptLocation => None,
            Validator::RegularExpression(pattern) => Some(Value::String(pattern.as_str().to_string())),
            Validator::MinimumLength { length } => Some(json!({ "length": length })),
            Validator::ContainsLowerCase { occurrences }
            | Validator::ContainsUpperCase { occurrences }
            | Validator::ContainsInteger { occurrences }
            | Validator::ContainsNonAlphaNumeric { occurrences } => {
                Some(json!({ "occurrences": occurrences }))
            }
            Validator::Compare(options) => Some(json!({
                "dataType": options.data_type.as_str(),
                "operator": options.operator.as_str(),
                "compareValue": options.compare_value,
            })),
            Validator::ExcludesUsername { username } => Some(json!({ "username": username })),
        }
    }
}

fn invalid(kind: ValidatorKind, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidOptions {
        kind: kind.as_str(),
        reason: reason.into(),
    }
}

/// Non-negative count under `key`. Absent, null or zero falls back to
/// `default`.
fn count_option(
    kind: ValidatorKind,
    options: Option<&Value>,
    key: &str,
    default: usize,
) -> Result<usize> {
    let raw = match options {
        None => return Ok(default),
        Some(Value::Object(map)) => map.get(key),
        Some(_) => return Err(invalid(kind, format!("expected an object with `{}`", key))),
    };

    match raw {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(0) => Ok(default),
            Some(count) => usize::try_from(count).map_err(|_| invalid(kind, "count too large")),
            None => Err(invalid(kind, format!("`{}` must be a non-negative integer", key))),
        },
        Some(other) => Err(invalid(kind, format!("`{}` must be a number, found {}", key, other))),
    }
}

fn compare_options(options: Option<&Value>) -> Result<CompareOptions> {
    let kind = ValidatorKind::Compare;
    let map = options
        .and_then(Value::as_object)
        .ok_or_else(|| invalid(kind, "expected dataType, operator and compareValue"))?;

    let tag = |key: &str| -> Result<&str> {
        map.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| invalid(kind, format!("missing `{}`", key)))
    };

    let data_type = CompareDataType::parse(tag("dataType")?)?;
    let operator = CompareOperator::parse(tag("operator")?, data_type)?;
    let compare_value = map.get("compareValue").cloned().unwrap_or(Value::Null);

    Ok(CompareOptions {
        data_type,
        operator,
        compare_value,
    })
}

impl Serialize for Validator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(self.kind().as_str().to_string()));
        if let Some(options) = self.options() {
            map.insert("options".to_string(), options);
        }
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Validator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Validator::try_from(&value).map_err(D::Error::custom)
    }
}

impl TryFrom<&Value> for Validator {
    type Error = ValidationError;

    /// Descriptor object: `type` (or `kind`) plus optional `options`.
    fn try_from(value: &Value) -> Result<Self> {
        let tag = value
            .get("type")
            .or_else(|| value.get("kind"))
            .and_then(Value::as_str)
            .ok_or_else(|| ValidationError::UnknownValidatorKind(value.to_string()))?;
        Validator::from_parts(tag, value.get("options"))
    }
}

/// Ordered validators; a value passes only if every one passes.
///
/// Deserializes from one descriptor or an array of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatorList(Vec<Validator>);

impl ValidatorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, validator: Validator) {
        self.0.push(validator);
    }

    pub fn with(mut self, validator: Validator) -> Self {
        self.0.push(validator);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Validator> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Validator] {
        &self.0
    }
}

impl From<Validator> for ValidatorList {
    fn from(validator: Validator) -> Self {
        Self(vec![validator])
    }
}

impl From<Vec<Validator>> for ValidatorList {
    fn from(validators: Vec<Validator>) -> Self {
        Self(validators)
    }
}

impl FromIterator<Validator> for ValidatorList {
    fn from_iter<I: IntoIterator<Item = Validator>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ValidatorList {
    type Item = Validator;
    type IntoIter = std::vec::IntoIter<Validator>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidatorList {
    type Item = &'a Validator;
    type IntoIter = std::slice::Iter<'a, Validator>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for ValidatorList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidatorList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ValidatorList::try_from(&value).map_err(D::Error::custom)
    }
}

impl TryFrom<&Value> for ValidatorList {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Array(items) => items.iter().map(Validator::try_from).collect(),
            single => Validator::try_from(single).map(Self::from),
        }
    }
}
