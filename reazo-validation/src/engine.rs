// Rule evaluation

use crate::structure::{is_google_place_result, is_script_location};
use crate::value::{is_present, parse_float, stringify, to_number};
use crate::{Result, Validator, ValidatorList};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const TARGET: &str = "reazo::engine";

/// Largest timestamp a date may carry, in milliseconds either side of the epoch.
const MAX_TIMESTAMP_MILLIS: f64 = 8.64e15;

const NAIVE_DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// How `CONTAINS_*` rules count their characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceMode {
    /// Matching characters anywhere in the value.
    #[default]
    Total,
    /// A single run of adjacent matching characters.
    Consecutive,
}

impl OccurrenceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OccurrenceMode::Total => "total",
            OccurrenceMode::Consecutive => "consecutive",
        }
    }
}

impl FromStr for OccurrenceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "total" => Ok(OccurrenceMode::Total),
            "consecutive" => Ok(OccurrenceMode::Consecutive),
            other => Err(format!("unknown occurrence mode: {}", other)),
        }
    }
}

impl fmt::Display for OccurrenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub occurrence_mode: OccurrenceMode,
}

impl EngineOptions {
    pub fn with_occurrence_mode(mut self, mode: OccurrenceMode) -> Self {
        self.occurrence_mode = mode;
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum CharClass {
    Lower,
    Upper,
    Digit,
    NonWord,
}

impl CharClass {
    fn matches(self, c: char) -> bool {
        match self {
            CharClass::Lower => c.is_ascii_lowercase(),
            CharClass::Upper => c.is_ascii_uppercase(),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::NonWord => !(c.is_ascii_alphanumeric() || c == '_'),
        }
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Length of the longest run of characters satisfying `pred`.
fn longest_run(text: &str, pred: impl Fn(char) -> bool) -> usize {
    let mut best = 0;
    let mut current = 0;
    for c in text.chars() {
        if pred(c) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Stateless rule interpreter.
///
/// ```
/// use reazo_validation::{Engine, EngineOptions, OccurrenceMode, Validator};
/// use serde_json::json;
///
/// let rule = Validator::ContainsUpperCase { occurrences: 2 };
///
/// let total = Engine::default();
/// let consecutive = Engine::with_options(
///     EngineOptions::default().with_occurrence_mode(OccurrenceMode::Consecutive),
/// );
///
/// assert!(total.check(&rule, &json!("aA1aA1")).unwrap());
/// assert!(!consecutive.check(&rule, &json!("aA1aA1")).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Validate one value.
    ///
    /// Missing values (`null`, `""`, `false`, `0`) fail only when required.
    /// Present values must pass every validator in order.
    pub fn validate(
        &self,
        value: &Value,
        required: bool,
        validators: Option<&ValidatorList>,
    ) -> Result<bool> {
        if !is_present(value) {
            return Ok(!required);
        }

        let Some(validators) = validators else {
            return Ok(true);
        };

        for validator in validators {
            if !self.check(validator, value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Evaluate a single rule against a present value.
    pub fn check(&self, validator: &Validator, value: &Value) -> Result<bool> {
        let outcome = match validator {
            Validator::Integer => Ok(is_integer(value)),
            Validator::Number => Ok(is_number(value)),
            Validator::Date => Ok(is_date(value)),
            Validator::RegularExpression(pattern) => Ok(pattern.is_match(&stringify(value))),
            Validator::MinimumLength { length } => Ok(self.has_min_length(value, *length)),
            Validator::ContainsLowerCase { occurrences } => {
                Ok(self.contains(value, CharClass::Lower, *occurrences))
            }
            Validator::ContainsUpperCase { occurrences } => {
                Ok(self.contains(value, CharClass::Upper, *occurrences))
            }
            Validator::ContainsInteger { occurrences } => {
                Ok(self.contains(value, CharClass::Digit, *occurrences))
            }
            Validator::ContainsNonAlphaNumeric { occurrences } => {
                Ok(self.contains(value, CharClass::NonWord, *occurrences))
            }
            Validator::Compare(options) => options.evaluate(value),
            Validator::GooglePlaceResult => Ok(is_google_place_result(value)),
            Validator::ScriptLocation => Ok(is_script_location(value)),
            Validator::ExcludesUsername { username } => Ok(excludes_username(value, username)),
        };

        match &outcome {
            Ok(passed) => {
                reazo_log::trace!(target: TARGET, "{} -> {}", validator.kind(), passed);
            }
            Err(err) => {
                reazo_log::warn!(target: TARGET, "{} cannot be evaluated: {}", validator.kind(), err);
            }
        }
        outcome
    }

    fn has_min_length(&self, value: &Value, length: usize) -> bool {
        let text = stringify(value);
        match self.options.occurrence_mode {
            OccurrenceMode::Total => text.chars().count() >= length,
            OccurrenceMode::Consecutive => longest_run(&text, |c| !is_line_terminator(c)) >= length,
        }
    }

    fn contains(&self, value: &Value, class: CharClass, occurrences: usize) -> bool {
        let text = stringify(value);
        let occurrences = occurrences.max(1);
        match self.options.occurrence_mode {
            OccurrenceMode::Total => text.chars().filter(|c| class.matches(*c)).count() >= occurrences,
            OccurrenceMode::Consecutive => longest_run(&text, |c| class.matches(c)) >= occurrences,
        }
    }
}

fn is_integer(value: &Value) -> bool {
    if to_number(value).is_nan() {
        return false;
    }
    let parsed = parse_float(value);
    parsed.is_finite()
        && parsed.fract() == 0.0
        && parsed >= f64::from(i32::MIN)
        && parsed <= f64::from(i32::MAX)
}

fn is_number(value: &Value) -> bool {
    !parse_float(value).is_nan() && to_number(value).is_finite()
}

fn is_date(value: &Value) -> bool {
    match value {
        Value::Number(n) => n
            .as_f64()
            .is_some_and(|ms| ms.is_finite() && ms.abs() <= MAX_TIMESTAMP_MILLIS),
        Value::String(s) => parses_as_date(s.trim()),
        _ => false,
    }
}

fn parses_as_date(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if DateTime::parse_from_rfc3339(text).is_ok() || DateTime::parse_from_rfc2822(text).is_ok() {
        return true;
    }
    if NAIVE_DATE_TIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
    {
        return true;
    }
    if NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok() {
        return true;
    }
    compact_date(text).is_some()
}

/// `YYYYMMDD`
fn compact_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = text[0..4].parse().ok()?;
    let month = text[4..6].parse().ok()?;
    let day = text[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn excludes_username(value: &Value, username: &str) -> bool {
    if username.is_empty() {
        return true;
    }
    !stringify(value)
        .to_ascii_lowercase()
        .contains(&username.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{CompareDataType, CompareOperator, CompareOptions};
    use serde_json::json;

    fn consecutive() -> Engine {
        Engine::with_options(EngineOptions::default().with_occurrence_mode(OccurrenceMode::Consecutive))
    }

    #[test]
    fn test_presence_rule() {
        let engine = Engine::default();
        for missing in [json!(null), json!(""), json!(false), json!(0)] {
            assert!(!engine.validate(&missing, true, None).unwrap());
            assert!(engine.validate(&missing, false, None).unwrap());
        }
        assert!(engine.validate(&json!("x"), true, None).unwrap());
        assert!(engine.validate(&json!([]), true, None).unwrap());
    }

    #[test]
    fn test_optional_missing_skips_validators() {
        let list = ValidatorList::from(Validator::Integer);
        assert!(Engine::default().validate(&json!(""), false, Some(&list)).unwrap());
    }

    #[test]
    fn test_integer() {
        let engine = Engine::default();
        assert!(engine.check(&Validator::Integer, &json!("42")).unwrap());
        assert!(engine.check(&Validator::Integer, &json!(-7)).unwrap());
        assert!(engine.check(&Validator::Integer, &json!("1e3")).unwrap());
        assert!(!engine.check(&Validator::Integer, &json!("4.2")).unwrap());
        assert!(!engine.check(&Validator::Integer, &json!("42abc")).unwrap());
        assert!(!engine.check(&Validator::Integer, &json!("3000000000")).unwrap());
    }

    #[test]
    fn test_number() {
        let engine = Engine::default();
        assert!(engine.check(&Validator::Number, &json!("4.2")).unwrap());
        assert!(engine.check(&Validator::Number, &json!(" 12 ")).unwrap());
        assert!(!engine.check(&Validator::Number, &json!("12px")).unwrap());
        assert!(!engine.check(&Validator::Number, &json!("Infinity")).unwrap());
        assert!(!engine.check(&Validator::Number, &json!(true)).unwrap());
    }

    #[test]
    fn test_date() {
        let engine = Engine::default();
        for date in [
            "2024-03-09",
            "20240309",
            "2024-03-09T14:05:07Z",
            "2024-03-09 14:05",
            "2024-03-09T14:05:07.123",
            "Sat, 09 Mar 2024 14:05:07 +0000",
        ] {
            assert!(engine.check(&Validator::Date, &json!(date)).unwrap(), "{}", date);
        }
        assert!(engine.check(&Validator::Date, &json!(1_700_000_000_000_i64)).unwrap());
        assert!(!engine.check(&Validator::Date, &json!("2024-02-30")).unwrap());
        assert!(!engine.check(&Validator::Date, &json!("yesterday")).unwrap());
    }

    #[test]
    fn test_regular_expression_is_unanchored() {
        let rule = Validator::pattern("[0-9]{3}").unwrap();
        let engine = Engine::default();
        assert!(engine.check(&rule, &json!("ab123cd")).unwrap());
        assert!(!engine.check(&rule, &json!("ab12cd")).unwrap());
        assert!(engine.check(&rule, &json!(12345)).unwrap());
    }

    #[test]
    fn test_minimum_length() {
        let rule = Validator::MinimumLength { length: 4 };
        assert!(Engine::default().check(&rule, &json!("abcd")).unwrap());
        assert!(!Engine::default().check(&rule, &json!("abc")).unwrap());
        assert!(Engine::default().check(&rule, &json!("ab\ncd")).unwrap());
        assert!(!consecutive().check(&rule, &json!("ab\ncd")).unwrap());
    }

    #[test]
    fn test_lengths_count_chars() {
        let rule = Validator::MinimumLength { length: 2 };
        assert!(!Engine::default().check(&rule, &json!("😀")).unwrap());
        assert!(!consecutive().check(&rule, &json!("😀")).unwrap());
        assert!(Engine::default().check(&rule, &json!("😀😀")).unwrap());
    }

    #[test]
    fn test_integral_float_is_checked_as_integer_text() {
        let engine = Engine::default();
        let min = Validator::MinimumLength { length: 3 };
        assert!(!engine.check(&min, &json!(1.0)).unwrap());
        assert!(engine.check(&min, &json!(100.0)).unwrap());

        let digits = Validator::pattern(r"^\d+$").unwrap();
        assert!(engine.check(&digits, &json!(1.0)).unwrap());
        assert!(!engine.check(&digits, &json!(1.5)).unwrap());
    }

    #[test]
    fn test_occurrence_modes() {
        let upper = Validator::ContainsUpperCase { occurrences: 2 };
        assert!(Engine::default().check(&upper, &json!("aA1aA1")).unwrap());
        assert!(!consecutive().check(&upper, &json!("aA1aA1")).unwrap());
        assert!(consecutive().check(&upper, &json!("AAbb")).unwrap());

        let symbols = Validator::ContainsNonAlphaNumeric { occurrences: 1 };
        assert!(!Engine::default().check(&symbols, &json!("under_score")).unwrap());
        assert!(Engine::default().check(&symbols, &json!("pass word")).unwrap());

        let digits = Validator::ContainsInteger { occurrences: 3 };
        assert!(Engine::default().check(&digits, &json!("1a2b3")).unwrap());
        assert!(!consecutive().check(&digits, &json!("1a2b3")).unwrap());
    }

    #[test]
    fn test_excludes_username() {
        let rule = Validator::ExcludesUsername {
            username: "Jdoe".to_string(),
        };
        assert!(!Engine::default().check(&rule, &json!("myJDOEpass1")).unwrap());
        assert!(Engine::default().check(&rule, &json!("Secr3t!")).unwrap());
    }

    #[test]
    fn test_compare_error_propagates() {
        let rule = Validator::Compare(CompareOptions::new(
            CompareDataType::String,
            CompareOperator::GreaterThanOrEqual,
            "a",
        ));
        let list = ValidatorList::from(rule);
        assert!(Engine::default().validate(&json!("b"), true, Some(&list)).is_err());
    }

    #[test]
    fn test_short_circuit_on_first_failure() {
        let list = ValidatorList::from(vec![
            Validator::MinimumLength { length: 10 },
            Validator::Compare(CompareOptions::new(
                CompareDataType::String,
                CompareOperator::GreaterThanOrEqual,
                "a",
            )),
        ]);
        assert!(!Engine::default().validate(&json!("short"), true, Some(&list)).unwrap());
    }

    #[test]
    fn test_occurrence_mode_parse() {
        assert_eq!("Consecutive".parse::<OccurrenceMode>(), Ok(OccurrenceMode::Consecutive));
        assert!("sometimes".parse::<OccurrenceMode>().is_err());
        let options: EngineOptions = serde_json::from_value(json!({"occurrence_mode": "consecutive"})).unwrap();
        assert_eq!(options.occurrence_mode, OccurrenceMode::Consecutive);
    }
}
