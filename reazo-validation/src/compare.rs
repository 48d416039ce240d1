// Compare validator

use crate::{Result, ValidationError};
use serde_json::Value;

/// Type a comparison is performed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareDataType {
    String,
    Number,
}

impl CompareDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareDataType::String => "STRING",
            CompareDataType::Number => "NUMBER",
        }
    }

    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "STRING" => Ok(CompareDataType::String),
            "NUMBER" => Ok(CompareDataType::Number),
            other => Err(ValidationError::UnsupportedCompareDataType(other.to_string())),
        }
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOperator {
    Equal,
    NotEqual,
    /// Only defined for [`CompareDataType::Number`]
    GreaterThanOrEqual,
}

impl CompareOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOperator::Equal => "EQUAL",
            CompareOperator::NotEqual => "NOT_EQUAL",
            CompareOperator::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
        }
    }

    pub fn parse(tag: &str, data_type: CompareDataType) -> Result<Self> {
        match tag {
            "EQUAL" => Ok(CompareOperator::Equal),
            "NOT_EQUAL" => Ok(CompareOperator::NotEqual),
            "GREATER_THAN_OR_EQUAL" => Ok(CompareOperator::GreaterThanOrEqual),
            other => Err(ValidationError::UnsupportedCompareOperator {
                data_type: data_type.as_str(),
                operator: other.to_string(),
            }),
        }
    }
}

/// Options of a `COMPARE` validator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareOptions {
    pub data_type: CompareDataType,
    pub operator: CompareOperator,
    pub compare_value: Value,
}

impl CompareOptions {
    pub fn new(
        data_type: CompareDataType,
        operator: CompareOperator,
        compare_value: impl Into<Value>,
    ) -> Self {
        Self {
            data_type,
            operator,
            compare_value: compare_value.into(),
        }
    }

    /// String equality against `expected`.
    pub fn string_equals(expected: impl Into<String>) -> Self {
        Self::new(
            CompareDataType::String,
            CompareOperator::Equal,
            Value::String(expected.into()),
        )
    }

    /// Evaluate against `value`.
    ///
    /// A value of the wrong type never equals the compare value and always
    /// differs from it. Operators the data type does not define, and number
    /// comparisons against a non-numeric compare value, are errors.
    pub fn evaluate(&self, value: &Value) -> Result<bool> {
        match self.data_type {
            CompareDataType::String => self.compare_string(value),
            CompareDataType::Number => self.compare_number(value),
        }
    }

    fn compare_string(&self, value: &Value) -> Result<bool> {
        let actual = value.as_str();
        let expected = self.compare_value.as_str();

        match self.operator {
            CompareOperator::Equal => Ok(actual.is_some() && actual == expected),
            CompareOperator::NotEqual => Ok(actual.is_none() || actual != expected),
            CompareOperator::GreaterThanOrEqual => Err(ValidationError::UnsupportedCompareOperator {
                data_type: CompareDataType::String.as_str(),
                operator: self.operator.as_str().to_string(),
            }),
        }
    }

    fn compare_number(&self, value: &Value) -> Result<bool> {
        let expected = self
            .compare_value
            .as_f64()
            .ok_or_else(|| ValidationError::InvalidCompareValue {
                data_type: CompareDataType::Number.as_str(),
                expected: "a number",
                found: self.compare_value.to_string(),
            })?;
        let actual = value.as_f64();

        Ok(match self.operator {
            CompareOperator::Equal => actual == Some(expected),
            CompareOperator::NotEqual => actual != Some(expected),
            CompareOperator::GreaterThanOrEqual => actual.is_some_and(|a| a >= expected),
        })
    }
}
