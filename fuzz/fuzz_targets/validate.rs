//! Fuzz target for value validation.
//!
//! Runs every rule family against arbitrary text in both occurrence modes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reazo_validation::{Engine, EngineOptions, OccurrenceMode, Validator, ValidatorList};
use serde_json::json;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    text: String,
    required: bool,
    length: u8,
    occurrences: u8,
    consecutive: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mode = if input.consecutive {
        OccurrenceMode::Consecutive
    } else {
        OccurrenceMode::Total
    };
    let engine = Engine::with_options(EngineOptions::default().with_occurrence_mode(mode));
    let occurrences = usize::from(input.occurrences);

    let rules = ValidatorList::from(vec![
        Validator::Integer,
        Validator::Number,
        Validator::Date,
        Validator::MinimumLength { length: usize::from(input.length) },
        Validator::ContainsLowerCase { occurrences },
        Validator::ContainsUpperCase { occurrences },
        Validator::ContainsInteger { occurrences },
        Validator::ContainsNonAlphaNumeric { occurrences },
        Validator::GooglePlaceResult,
        Validator::ScriptLocation,
    ]);

    let value = json!(input.text);
    for rule in &rules {
        let _ = engine.check(rule, &value);
    }

    let first = engine.validate(&value, input.required, Some(&rules));
    let second = engine.validate(&value, input.required, Some(&rules));
    assert_eq!(first.ok(), second.ok());
});
