// Password complexity policies

use crate::Validator;
use serde::{Deserialize, Serialize};

/// Password rules published by the identity provider.
///
/// A count of `0` or an absent count is no requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordComplexity {
    pub min_length: Option<u32>,
    pub min_lower_case: Option<u32>,
    pub min_upper_case: Option<u32>,
    pub min_number: Option<u32>,
    pub min_symbol: Option<u32>,
    pub exclude_username: bool,
}

impl PasswordComplexity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, n: u32) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn min_lower_case(mut self, n: u32) -> Self {
        self.min_lower_case = Some(n);
        self
    }

    pub fn min_upper_case(mut self, n: u32) -> Self {
        self.min_upper_case = Some(n);
        self
    }

    pub fn min_number(mut self, n: u32) -> Self {
        self.min_number = Some(n);
        self
    }

    pub fn min_symbol(mut self, n: u32) -> Self {
        self.min_symbol = Some(n);
        self
    }

    pub fn exclude_username(mut self, exclude: bool) -> Self {
        self.exclude_username = exclude;
        self
    }
}

fn positive(count: Option<u32>) -> Option<usize> {
    count.filter(|n| *n > 0).map(|n| n as usize)
}

/// Validators enforcing `complexity`, in the order length, upper, lower,
/// digit, symbol.
///
/// `exclude_username` is not enforced here; see
/// [`build_complexity_validators_for_user`].
///
/// ```
/// use reazo_validation::{build_complexity_validators, PasswordComplexity, Validator};
///
/// let policy = PasswordComplexity::new().min_length(8).min_number(1);
/// assert_eq!(
///     build_complexity_validators(Some(&policy)),
///     vec![
///         Validator::MinimumLength { length: 8 },
///         Validator::ContainsInteger { occurrences: 1 },
///     ],
/// );
/// assert!(build_complexity_validators(None).is_empty());
/// ```
pub fn build_complexity_validators(complexity: Option<&PasswordComplexity>) -> Vec<Validator> {
    let Some(complexity) = complexity else {
        return Vec::new();
    };

    let mut validators = Vec::new();
    if let Some(length) = positive(complexity.min_length) {
        validators.push(Validator::MinimumLength { length });
    }
    if let Some(occurrences) = positive(complexity.min_upper_case) {
        validators.push(Validator::ContainsUpperCase { occurrences });
    }
    if let Some(occurrences) = positive(complexity.min_lower_case) {
        validators.push(Validator::ContainsLowerCase { occurrences });
    }
    if let Some(occurrences) = positive(complexity.min_number) {
        validators.push(Validator::ContainsInteger { occurrences });
    }
    if let Some(occurrences) = positive(complexity.min_symbol) {
        validators.push(Validator::ContainsNonAlphaNumeric { occurrences });
    }
    validators
}

/// [`build_complexity_validators`] plus a username exclusion rule when the
/// policy asks for one and `username` is non-empty.
pub fn build_complexity_validators_for_user(
    complexity: Option<&PasswordComplexity>,
    username: &str,
) -> Vec<Validator> {
    let mut validators = build_complexity_validators(complexity);
    if complexity.is_some_and(|c| c.exclude_username) && !username.is_empty() {
        validators.push(Validator::ExcludesUsername {
            username: username.to_string(),
        });
    }
    validators
}

/// Requirement lines shown next to a password field.
pub fn complexity_messages(complexity: Option<&PasswordComplexity>) -> Vec<String> {
    let Some(complexity) = complexity else {
        return Vec::new();
    };

    let mut messages = Vec::new();
    if complexity.exclude_username {
        messages.push("Not contain your username".to_string());
    }
    if let Some(n) = positive(complexity.min_length) {
        messages.push(format!("Be at least {} characters in length", n));
    }
    if let Some(n) = positive(complexity.min_upper_case) {
        messages.push(format!("Contain at least {} uppercase characters (A-Z)", n));
    }
    if let Some(n) = positive(complexity.min_lower_case) {
        messages.push(format!("Contain at least {} lower case characters (a-z)", n));
    }
    if let Some(n) = positive(complexity.min_number) {
        messages.push(format!("Contain at least {} digit (0-9)", n));
    }
    if let Some(n) = positive(complexity.min_symbol) {
        messages.push(format!("Contain at least {} special characters (punctuation).", n));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn policy() -> PasswordComplexity {
        serde_json::from_value(json!({
            "minLength": 8,
            "minUpperCase": 0,
            "minLowerCase": 1,
            "minNumber": 1,
            "minSymbol": 0,
            "excludeUsername": true
        }))
        .unwrap()
    }

    #[test]
    fn test_builder_skips_zero_counts() {
        assert_eq!(
            build_complexity_validators(Some(&policy())),
            vec![
                Validator::MinimumLength { length: 8 },
                Validator::ContainsLowerCase { occurrences: 1 },
                Validator::ContainsInteger { occurrences: 1 },
            ]
        );
    }

    #[test]
    fn test_builder_order() {
        let all = PasswordComplexity::new()
            .min_symbol(1)
            .min_number(2)
            .min_lower_case(3)
            .min_upper_case(4)
            .min_length(5);
        let kinds: Vec<_> = build_complexity_validators(Some(&all))
            .iter()
            .map(Validator::kind)
            .map(|k| k.as_str())
            .collect();
        assert_eq!(
            kinds,
            [
                "MINIMUM_LENGTH",
                "CONTAINS_UPPER-CASE",
                "CONTAINS_LOWER_CASE",
                "CONTAINS_INTEGER",
                "CONTAINS_NON_ALPHA_NUMERIC"
            ]
        );
    }

    #[test]
    fn test_username_exclusion() {
        let validators = build_complexity_validators_for_user(Some(&policy()), "jdoe");
        assert_eq!(validators.len(), 4);
        assert_eq!(
            validators.last(),
            Some(&Validator::ExcludesUsername {
                username: "jdoe".to_string()
            })
        );

        assert_eq!(build_complexity_validators_for_user(Some(&policy()), "").len(), 3);
        let relaxed = policy().exclude_username(false);
        assert_eq!(build_complexity_validators_for_user(Some(&relaxed), "jdoe").len(), 3);
        assert!(build_complexity_validators_for_user(None, "jdoe").is_empty());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            complexity_messages(Some(&policy())),
            vec![
                "Not contain your username",
                "Be at least 8 characters in length",
                "Contain at least 1 lower case characters (a-z)",
                "Contain at least 1 digit (0-9)",
            ]
        );
        assert!(complexity_messages(None).is_empty());
    }

    #[test]
    fn test_partial_policy_deserializes() {
        let policy: PasswordComplexity = serde_json::from_value(json!({"minLength": 12})).unwrap();
        assert_eq!(policy.min_length, Some(12));
        assert!(!policy.exclude_username);
    }
}
