//! Fuzz target for validator descriptor parsing.
//!
//! Arbitrary JSON must either parse into validators or fail with an error,
//! and parsed validators must serialize back into descriptors that parse to
//! the same list.

#![no_main]

use libfuzzer_sys::fuzz_target;
use reazo_validation::{FieldRules, ValidatorList};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    if let Ok(list) = ValidatorList::try_from(&raw) {
        let encoded = serde_json::to_value(&list).expect("validators serialize");
        let decoded = ValidatorList::try_from(&encoded).expect("serialized validators parse");
        assert_eq!(list, decoded);
    }

    let _ = serde_json::from_value::<FieldRules>(raw);
});
