// Regular expressions shared by validators and input filters

use crate::{Result, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Email address.
pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#).unwrap()
});

/// North American phone number, optional country code and extension.
pub static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:\+?1\s*(?:[.-]\s*)?)?(?:\(\s*([2-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9])\s*\)|([2-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9]))\s*(?:[.-]\s*)?)?([2-9]1[02-9]|[2-9][02-9]1|[2-9][02-9]{2})\s*(?:[.-]\s*)?([0-9]{4})(?:\s*(?:#|x\.?|ext\.?|extension)\s*(\d+))?$").unwrap()
});

pub(crate) static ONLY_TEXT_WITH_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z ]*$").unwrap());

pub(crate) static NAME_WITH_SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z áéíóúÁÉÍÓÚüÜñÑ¿¡]*$").unwrap());

pub(crate) static TEXT_WITH_SPECIAL_CHARS_NO_QUESTION_MARK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z áéíóúÁÉÍÓÚüÜñÑ¡]*$").unwrap());

pub(crate) static ONLY_NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*$").unwrap());

pub(crate) static NUM_WITH_CHARACTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-zA-Z]*$").unwrap());

pub(crate) static NUM_WITH_CHARACTERS_AND_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-zA-Z ]*$").unwrap());

pub(crate) static NUM_WITH_CHARACTERS_AND_SPACE_AND_SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-zA-Z áéíóúÁÉÍÓÚüÜñÑ¿¡]*$").unwrap());

/// Email check on the lower-cased value.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(&value.to_lowercase())
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

/// Compiled pattern held by a `REGULAR_EXPRESSION` validator.
///
/// Matching is a search: the pattern may match anywhere in the value
/// unless it is anchored. `\d`, `\D`, `\w`, `\W` and `\b` are ASCII-only.
/// Look-around and backreferences are rejected as
/// [`ValidationError::InvalidPattern`].
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(&ascii_classes(pattern))
            .map(|regex| Self {
                source: pattern.to_string(),
                regex,
            })
            .map_err(|e| ValidationError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn email() -> Self {
        Self::from(EMAIL.clone())
    }

    pub fn phone() -> Self {
        Self::from(PHONE.clone())
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Rewrite class escapes to their ASCII forms. Character classes nest,
/// so the same replacement is valid inside `[...]`.
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push(c);
                    break;
                };
                match next {
                    'd' => out.push_str("[0-9]"),
                    'D' => out.push_str("[^0-9]"),
                    'w' => out.push_str("[0-9A-Za-z_]"),
                    'W' => out.push_str("[^0-9A-Za-z_]"),
                    'b' if !in_class => out.push_str("(?-u:\\b)"),
                    _ => {
                        out.push(c);
                        out.push(next);
                    }
                }
            }
            '[' => {
                in_class = true;
                out.push(c);
            }
            ']' => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self {
            source: regex.as_str().to_string(),
            regex,
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
