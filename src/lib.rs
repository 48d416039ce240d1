// Reazo - declarative form validation for account-management front ends
//
// The validation engine lives in `reazo-validation`; configuration and
// logging are optional layers re-exported here behind features.

pub use serde;
pub use serde_json;
pub use serde_json::{Value, json};

#[cfg(feature = "validation")]
pub use reazo_validation;

#[cfg(feature = "validation")]
pub use reazo_validation::{
    Engine, EngineOptions, FieldRule, FieldRules, FormReport, FormSchema, FormSnapshot,
    OccurrenceMode, PasswordComplexity, Result, Validate, ValidationError, ValidationForm,
    Validator, ValidatorList, build_complexity_validators, check_form, validate, validate_form,
    validate_validation_form,
};

#[cfg(feature = "config")]
pub use reazo_config;

#[cfg(feature = "log")]
pub use reazo_log;

/// Prelude for common imports
pub mod prelude {
    pub use serde_json::{Value, json};

    #[cfg(feature = "validation")]
    pub use reazo_validation::prelude::*;

    #[cfg(feature = "config")]
    pub use reazo_config::ConfigManager;
}
