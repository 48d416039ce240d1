//! Property tests for the value rules

use proptest::prelude::*;
use reazo_validation::{
    PasswordComplexity, Validator, ValidatorList, build_complexity_validators, validate,
};
use serde_json::{Value, json};

fn missing_value() -> impl Strategy<Value = Value> {
    prop_oneof![Just(json!(null)), Just(json!("")), Just(json!(false)), Just(json!(0))]
}

fn any_rules() -> impl Strategy<Value = ValidatorList> {
    prop::collection::vec(
        prop_oneof![
            Just(Validator::Integer),
            Just(Validator::Number),
            Just(Validator::Date),
            (0usize..20).prop_map(|length| Validator::MinimumLength { length }),
            (1usize..5).prop_map(|occurrences| Validator::ContainsUpperCase { occurrences }),
            (1usize..5).prop_map(|occurrences| Validator::ContainsNonAlphaNumeric { occurrences }),
        ],
        0..5,
    )
    .prop_map(ValidatorList::from)
}

proptest! {
    #[test]
    fn missing_optional_values_pass(value in missing_value(), rules in any_rules()) {
        prop_assert!(validate(&value, false, Some(&rules)).unwrap());
    }

    #[test]
    fn missing_required_values_fail(value in missing_value(), rules in any_rules()) {
        prop_assert!(!validate(&value, true, Some(&rules)).unwrap());
    }

    #[test]
    fn present_values_pass_without_validators(text in ".+", required in any::<bool>()) {
        prop_assert!(validate(&json!(text), required, None).unwrap());
    }

    #[test]
    fn validate_is_repeatable(text in "\\PC*", rules in any_rules()) {
        let value = json!(text);
        let first = validate(&value, true, Some(&rules)).unwrap();
        let second = validate(&value, true, Some(&rules)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn minimum_length_counts_characters(text in "\\PC{0,30}", length in 0usize..30) {
        let rules = ValidatorList::from(Validator::MinimumLength { length });
        let expected = !text.is_empty() && text.chars().count() >= length;
        prop_assert_eq!(validate(&json!(text), true, Some(&rules)).unwrap(), expected);
    }

    #[test]
    fn complexity_builder_is_pure(
        min_length in 0u32..20,
        min_upper in 0u32..5,
        min_lower in 0u32..5,
        min_number in 0u32..5,
        min_symbol in 0u32..5,
    ) {
        let policy = PasswordComplexity::new()
            .min_length(min_length)
            .min_upper_case(min_upper)
            .min_lower_case(min_lower)
            .min_number(min_number)
            .min_symbol(min_symbol);
        let first = build_complexity_validators(Some(&policy));
        prop_assert_eq!(&first, &build_complexity_validators(Some(&policy)));
        let expected = [min_length, min_upper, min_lower, min_number, min_symbol]
            .iter()
            .filter(|n| **n > 0)
            .count();
        prop_assert_eq!(first.len(), expected);
    }
}
