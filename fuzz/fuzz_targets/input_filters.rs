//! Fuzz target for keystroke input filters.
//!
//! The result of a filter is always either the edited or the previous value.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reazo_validation::filters::apply_named;

const FILTERS: [&str; 10] = [
    "onlyText",
    "textWithSpecialChars",
    "textWithSpecialCharsNoQ",
    "onlyNumbers",
    "onlyNumbersWithMaxLength",
    "onlyMaxLength",
    "onlyNumbersWithCharacters",
    "onlyNumbersWithCharactersWithSpace",
    "onlyNumbersWithCharactersWithSpaceWithSpecialChars",
    "unknown",
];

#[derive(Debug, Arbitrary)]
struct FuzzEdit {
    filter: u8,
    next: String,
    previous: String,
    max_length: Option<u8>,
}

fuzz_target!(|edit: FuzzEdit| {
    let name = FILTERS[usize::from(edit.filter) % FILTERS.len()];
    let result = apply_named(
        name,
        &edit.next,
        &edit.previous,
        edit.max_length.map(usize::from),
    );
    assert!(result == edit.next || result == edit.previous);
});
