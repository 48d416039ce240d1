//! Declarative field and form validation
//!
//! Validators are plain data (serializable as `{"type": ..., "options": ...}`)
//! interpreted by an [`Engine`]. A rule failing on user input is `Ok(false)`;
//! `Err` is reserved for rules that cannot be evaluated at all.
//!
//! # Examples
//!
//! ## Single values
//!
//! ```
//! use reazo_validation::{validate, Validator, ValidatorList};
//! use serde_json::json;
//!
//! let rules: ValidatorList = serde_json::from_value(json!([
//!     {"type": "MINIMUM_LENGTH", "options": {"length": 8}},
//!     {"type": "CONTAINS_INTEGER"}
//! ])).unwrap();
//!
//! assert!(validate(&json!("s3cretpass"), true, Some(&rules)).unwrap());
//! assert!(!validate(&json!("short1"), true, Some(&rules)).unwrap());
//!
//! // Missing values only fail when required
//! assert!(validate(&json!(""), false, Some(&rules)).unwrap());
//! assert!(!validate(&json!(""), true, None).unwrap());
//! ```
//!
//! ## Forms
//!
//! ```
//! use reazo_validation::{validate_form, FieldRule, FieldRules, Validator};
//! use serde_json::json;
//!
//! let rules = FieldRules::new()
//!     .field("username", FieldRule::required())
//!     .field("age", FieldRule::optional().with(Validator::Integer));
//!
//! let values = json!({"username": "", "age": "4.5"});
//! let mut invalid = Vec::new();
//! let valid = validate_form(&values, &rules, |field, _value, _| {
//!     invalid.push(field.to_string());
//! }).unwrap();
//!
//! assert!(!valid);
//! assert_eq!(invalid, ["username", "age"]);
//! ```
//!
//! ## Password policies
//!
//! ```
//! use reazo_validation::{build_complexity_validators, validate, PasswordComplexity, ValidatorList};
//! use serde_json::json;
//!
//! let policy: PasswordComplexity = serde_json::from_value(json!({
//!     "minLength": 8, "minUpperCase": 1, "minNumber": 1
//! })).unwrap();
//! let rules = ValidatorList::from(build_complexity_validators(Some(&policy)));
//!
//! assert!(validate(&json!("Passw0rdX"), true, Some(&rules)).unwrap());
//! assert!(!validate(&json!("password1"), true, Some(&rules)).unwrap());
//! ```

mod compare;
mod complexity;
mod engine;
mod errors;
mod form;
mod structure;
mod traits;
mod validators;

pub mod filters;
pub mod forms;
pub mod patterns;
pub mod schema;
pub mod value;

pub use compare::{CompareDataType, CompareOperator, CompareOptions};
pub use complexity::{
    PasswordComplexity, build_complexity_validators, build_complexity_validators_for_user,
    complexity_messages,
};
pub use engine::{Engine, EngineOptions, OccurrenceMode};
pub use errors::{Result, ValidationError};
pub use filters::InputFilter;
pub use form::{
    FieldRule, FieldRules, FieldState, FormReport, FormState, InvalidField, ValidatedField,
    ValidationForm,
};
pub use patterns::Pattern;
pub use schema::FormSchema;
pub use structure::{is_google_place_result, is_script_location};
pub use traits::{FormSnapshot, Validate};
pub use validators::{Validator, ValidatorKind, ValidatorList};

use serde_json::Value;

/// Validate one value with the default engine.
pub fn validate(value: &Value, required: bool, validators: Option<&ValidatorList>) -> Result<bool> {
    Engine::default().validate(value, required, validators)
}

/// Validate a form with the default engine. See [`Engine::validate_form`].
pub fn validate_form<S, F>(values: &S, rules: &FieldRules, on_invalid: F) -> Result<bool>
where
    S: FormSnapshot + ?Sized,
    F: FnMut(&str, &Value, bool),
{
    Engine::default().validate_form(values, rules, on_invalid)
}

/// Validate a self-describing form with the default engine.
pub fn validate_validation_form<F>(form: &ValidationForm, on_invalid: F) -> Result<bool>
where
    F: FnMut(&str, &Value, bool),
{
    Engine::default().validate_validation_form(form, on_invalid)
}

pub fn check_form<S>(values: &S, rules: &FieldRules) -> Result<FormReport>
where
    S: FormSnapshot + ?Sized,
{
    Engine::default().check_form(values, rules)
}

pub fn validate_field_change(rules: &FieldRules, field: &str, value: &Value) -> Result<bool> {
    Engine::default().validate_field_change(rules, field, value)
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Engine, FieldRule, FieldRules, FormSnapshot, PasswordComplexity, Validate, ValidationError,
        Validator, ValidatorList, build_complexity_validators, validate, validate_form,
    };
}
