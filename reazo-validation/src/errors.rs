// Configuration errors
//
// A failing rule is not an error: it is an `Ok(false)` from the engine.
// These variants describe validators that cannot be evaluated at all.

use reazo_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    /// Descriptor names a kind the engine does not know.
    #[error("Unknown validator type: {0}")]
    UnknownValidatorKind(String),

    /// Descriptor options have the wrong shape.
    #[error("Invalid options for {kind}: {reason}")]
    InvalidOptions { kind: &'static str, reason: String },

    /// Regular expression does not compile.
    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("The compare data type {0} is not supported.")]
    UnsupportedCompareDataType(String),

    /// Operator not defined for the data type (or not known at all).
    #[error("The compare operator {operator} is not supported for {data_type}.")]
    UnsupportedCompareOperator {
        data_type: &'static str,
        operator: String,
    },

    /// `compareValue` does not have the type the comparison needs.
    #[error("Compare value for {data_type} must be {expected}, found {found}")]
    InvalidCompareValue {
        data_type: &'static str,
        expected: &'static str,
        found: String,
    },

    /// A form schema or engine option failed to load.
    #[error("Schema error: {0}")]
    Schema(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
