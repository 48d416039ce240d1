// Keystroke input filters
//
// A filter decides whether an edited input value is accepted or the previous
// value is kept. Only the character class and length of the whole value are
// checked.

use crate::patterns::{
    NAME_WITH_SPECIAL_CHARS, NUM_WITH_CHARACTERS, NUM_WITH_CHARACTERS_AND_SPACE,
    NUM_WITH_CHARACTERS_AND_SPACE_AND_SPECIAL_CHARS, ONLY_NUMBERS, ONLY_TEXT_WITH_SPACE,
    TEXT_WITH_SPECIAL_CHARS_NO_QUESTION_MARK,
};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFilter {
    /// ASCII letters and spaces
    OnlyText,
    /// Letters, spaces and Spanish accented characters
    TextWithSpecialChars,
    /// As [`InputFilter::TextWithSpecialChars`] without `¿`
    TextWithSpecialCharsNoQuestionMark,
    OnlyNumbers,
    OnlyNumbersWithMaxLength,
    /// Any characters, length limited
    OnlyMaxLength,
    NumbersWithCharacters,
    NumbersWithCharactersAndSpace,
    NumbersWithCharactersAndSpaceAndSpecialChars,
}

impl InputFilter {
    /// Filter named by an input's `validationtype` attribute.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "onlyText" => InputFilter::OnlyText,
            "textWithSpecialChars" => InputFilter::TextWithSpecialChars,
            "textWithSpecialCharsNoQ" => InputFilter::TextWithSpecialCharsNoQuestionMark,
            "onlyNumbers" => InputFilter::OnlyNumbers,
            "onlyNumbersWithMaxLength" => InputFilter::OnlyNumbersWithMaxLength,
            "onlyMaxLength" => InputFilter::OnlyMaxLength,
            "onlyNumbersWithCharacters" => InputFilter::NumbersWithCharacters,
            "onlyNumbersWithCharactersWithSpace" => InputFilter::NumbersWithCharactersAndSpace,
            "onlyNumbersWithCharactersWithSpaceWithSpecialChars" => {
                InputFilter::NumbersWithCharactersAndSpaceAndSpecialChars
            }
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputFilter::OnlyText => "onlyText",
            InputFilter::TextWithSpecialChars => "textWithSpecialChars",
            InputFilter::TextWithSpecialCharsNoQuestionMark => "textWithSpecialCharsNoQ",
            InputFilter::OnlyNumbers => "onlyNumbers",
            InputFilter::OnlyNumbersWithMaxLength => "onlyNumbersWithMaxLength",
            InputFilter::OnlyMaxLength => "onlyMaxLength",
            InputFilter::NumbersWithCharacters => "onlyNumbersWithCharacters",
            InputFilter::NumbersWithCharactersAndSpace => "onlyNumbersWithCharactersWithSpace",
            InputFilter::NumbersWithCharactersAndSpaceAndSpecialChars => {
                "onlyNumbersWithCharactersWithSpaceWithSpecialChars"
            }
        }
    }

    fn class(&self) -> Option<&'static Regex> {
        match self {
            InputFilter::OnlyText => Some(&*ONLY_TEXT_WITH_SPACE),
            InputFilter::TextWithSpecialChars => Some(&*NAME_WITH_SPECIAL_CHARS),
            InputFilter::TextWithSpecialCharsNoQuestionMark => {
                Some(&*TEXT_WITH_SPECIAL_CHARS_NO_QUESTION_MARK)
            }
            InputFilter::OnlyNumbers | InputFilter::OnlyNumbersWithMaxLength => Some(&*ONLY_NUMBERS),
            InputFilter::OnlyMaxLength => None,
            InputFilter::NumbersWithCharacters => Some(&*NUM_WITH_CHARACTERS),
            InputFilter::NumbersWithCharactersAndSpace => Some(&*NUM_WITH_CHARACTERS_AND_SPACE),
            InputFilter::NumbersWithCharactersAndSpaceAndSpecialChars => {
                Some(&*NUM_WITH_CHARACTERS_AND_SPACE_AND_SPECIAL_CHARS)
            }
        }
    }

    fn limits_length(&self) -> bool {
        matches!(
            self,
            InputFilter::TextWithSpecialChars
                | InputFilter::TextWithSpecialCharsNoQuestionMark
                | InputFilter::OnlyNumbersWithMaxLength
                | InputFilter::OnlyMaxLength
        )
    }

    /// Value the input should show after an edit from `previous` to `next`.
    ///
    /// An empty `next` is always accepted. `max_length` applies only to the
    /// length-limited filters; `None` means no limit.
    ///
    /// ```
    /// use reazo_validation::InputFilter;
    ///
    /// assert_eq!(InputFilter::OnlyNumbers.apply("12a", "12", None), "12");
    /// assert_eq!(InputFilter::OnlyNumbers.apply("123", "12", None), "123");
    /// assert_eq!(InputFilter::OnlyMaxLength.apply("abcd", "abc", Some(3)), "abc");
    /// ```
    pub fn apply(&self, next: &str, previous: &str, max_length: Option<usize>) -> String {
        if next.is_empty() {
            return String::new();
        }

        let class_ok = self.class().is_none_or(|class| class.is_match(next));
        let length_ok = !self.limits_length() || max_length.is_none_or(|max| fits_max_length(next, max));

        if class_ok && length_ok {
            next.to_string()
        } else {
            previous.to_string()
        }
    }
}

impl FromStr for InputFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputFilter::from_name(s).ok_or_else(|| format!("unknown input filter: {}", s))
    }
}

impl fmt::Display for InputFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply the filter called `name`; unknown names accept `next` unchanged.
pub fn apply_named(name: &str, next: &str, previous: &str, max_length: Option<usize>) -> String {
    match InputFilter::from_name(name) {
        Some(filter) => filter.apply(next, previous, max_length),
        None => next.to_string(),
    }
}

/// Whether `value` has at most `max_length` characters.
pub fn fits_max_length(value: &str, max_length: usize) -> bool {
    value.chars().count() <= max_length
}

/// Whether `value` has exactly `length` characters.
pub fn has_exact_length(value: &str, length: usize) -> bool {
    value.chars().count() == length
}
