//! Submission-time validation of the treatment-log form.

use crate::models::draft::{Signatures, TreatmentFormData};
use crate::models::form_field::{FieldKey, FormField, SignatureRole};
use std::collections::BTreeMap;

/// Per-field error messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: BTreeMap<FieldKey, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn get(&self, key: impl Into<FieldKey>) -> Option<&str> {
        self.messages.get(&key.into()).map(String::as_str)
    }

    pub fn contains(&self, key: impl Into<FieldKey>) -> bool {
        self.messages.contains_key(&key.into())
    }

    pub fn insert(&mut self, key: impl Into<FieldKey>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    pub fn remove(&mut self, key: impl Into<FieldKey>) -> Option<String> {
        self.messages.remove(&key.into())
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.messages.iter().map(|(k, v)| (k, v.as_str()))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// A value the numeric fields accept: a finite number strictly above zero.
pub fn parse_positive(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}

const REQUIRED: [(FormField, &str); 5] = [
    (FormField::Vessel, "Please select a vessel"),
    (FormField::TankNumber, "Please select a tank number"),
    (FormField::DyeColor, "Please select a dye color"),
    (FormField::DischargeRate, "Please enter discharge rate"),
    (FormField::QuantityDischarged, "Please enter quantity discharged"),
];

const NUMERIC: [(FormField, &str); 2] = [
    (FormField::DischargeRate, "Please enter a valid discharge rate"),
    (FormField::QuantityDischarged, "Please enter a valid quantity"),
];

/// Check every required value and both numeric fields.
pub fn validate(form: &TreatmentFormData, signatures: &Signatures) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    for (field, message) in REQUIRED {
        if is_blank(form.get(field)) {
            errors.insert(field, message);
        }
    }

    if is_blank(&signatures.technician) {
        errors.insert(
            SignatureRole::Technician,
            "Technician signature is required",
        );
    }
    if is_blank(&signatures.operator) {
        errors.insert(
            SignatureRole::Operator,
            "Terminal operator signature is required",
        );
    }

    for (field, message) in NUMERIC {
        let raw = form.get(field);
        if !is_blank(raw) && parse_positive(raw).is_none() {
            errors.insert(field, message);
        }
    }

    errors
}
