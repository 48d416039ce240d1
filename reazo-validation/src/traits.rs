// Validation traits

use crate::form::{FieldRules, FormReport, FormState};
use crate::{Engine, Result};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Read access to the current values of a form.
pub trait FormSnapshot {
    /// Current value of `field`, `None` if the form has no such field.
    fn field_value(&self, field: &str) -> Option<&Value>;
}

impl FormSnapshot for HashMap<String, Value> {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl FormSnapshot for BTreeMap<String, Value> {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl FormSnapshot for Map<String, Value> {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

/// Plain objects act as forms; other values have no fields.
impl FormSnapshot for Value {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(field))
    }
}

impl FormSnapshot for FormState {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).map(|state| &state.value)
    }
}

impl<T: FormSnapshot + ?Sized> FormSnapshot for &T {
    fn field_value(&self, field: &str) -> Option<&Value> {
        (**self).field_value(field)
    }
}

/// Trait for forms that know their own rules
pub trait Validate: FormSnapshot {
    fn rules(&self) -> FieldRules;

    /// Validate with the default engine.
    fn validate(&self) -> Result<FormReport> {
        Engine::default().check_form(self, &self.rules())
    }
}
