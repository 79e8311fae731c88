//! # Validation Rules
//!
//! Pure per-field and whole-record validation. The result is data — a
//! [`ValidationReport`] mapping fields to messages — and nothing here touches
//! presentation or the network. A hosting UI renders styling purely from the
//! report.
//!
//! Rules, first failing rule per field wins:
//! 1. `name`: required, non-empty after trimming.
//! 2. `platform`: required, non-empty after trimming.
//! 3. `released`: required, present. (Format is checked by the conversion
//!    step at commit time, not here.)
//! 4. `genre`, `developer`: optional; at least 2 characters when present.

use crate::model::{Field, FieldValues};
use std::collections::BTreeMap;

/// Field-keyed validation errors. No entry for a field means it is currently
/// valid. Ordered by field precedence so reports render deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// The current message for `field`, if it is invalid.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Validates a single field value. `None` means valid.
pub fn validate_field(field: Field, value: &str) -> Option<String> {
    match field {
        Field::Name => required(value, "Game name is required"),
        Field::Platform => required(value, "Platform is required"),
        Field::Released => required(value, "Release date is required"),
        Field::Genre => min_length(value, "Genre must be at least 2 characters"),
        Field::Developer => min_length(value, "Developer must be at least 2 characters"),
    }
}

/// Validates every field, required fields included even when untouched.
pub fn validate_record(values: &FieldValues) -> ValidationReport {
    let mut report = ValidationReport::default();
    for field in Field::ALL {
        if let Some(message) = validate_field(field, values.get(field)) {
            report.insert(field, message);
        }
    }
    report
}

fn required(value: &str, message: &str) -> Option<String> {
    value.trim().is_empty().then(|| message.to_string())
}

fn min_length(value: &str, message: &str) -> Option<String> {
    (!value.is_empty() && value.chars().count() < 2).then(|| message.to_string())
}
