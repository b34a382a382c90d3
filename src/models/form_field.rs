use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

/// Editable fields of the treatment-log form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FormField {
    Vessel,
    TankNumber,
    DyeColor,
    DischargeRate,
    QuantityDischarged,
    Comments,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Vessel,
        FormField::TankNumber,
        FormField::DyeColor,
        FormField::DischargeRate,
        FormField::QuantityDischarged,
        FormField::Comments,
    ];

    /// Key used in the serialized draft (`formData.<key>`).
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Vessel => "vessel",
            FormField::TankNumber => "tankNumber",
            FormField::DyeColor => "dyeColor",
            FormField::DischargeRate => "dischargeRate",
            FormField::QuantityDischarged => "quantityDischarged",
            FormField::Comments => "comments",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Vessel => "Vessel",
            FormField::TankNumber => "Tank Number",
            FormField::DyeColor => "Dye Color",
            FormField::DischargeRate => "Discharge Rate (m³/h)",
            FormField::QuantityDischarged => "Quantity Discharged (m³)",
            FormField::Comments => "Treatment Comments",
        }
    }

    /// Helper: accept camelCase, snake_case and kebab-case names from the CLI
    pub fn from_name(name: &str) -> AppResult<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "vessel" => Ok(FormField::Vessel),
            "tanknumber" | "tank" => Ok(FormField::TankNumber),
            "dyecolor" | "dye" => Ok(FormField::DyeColor),
            "dischargerate" | "rate" => Ok(FormField::DischargeRate),
            "quantitydischarged" | "quantity" => Ok(FormField::QuantityDischarged),
            "comments" | "comment" => Ok(FormField::Comments),
            _ => Err(AppError::InvalidField(name.to_string())),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Who signed the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SignatureRole {
    Technician,
    Operator,
}

impl SignatureRole {
    pub fn key(&self) -> &'static str {
        match self {
            SignatureRole::Technician => "technicianSignature",
            SignatureRole::Operator => "operatorSignature",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignatureRole::Technician => "Technician Signature",
            SignatureRole::Operator => "Terminal Operator Signature",
        }
    }

    pub fn from_name(name: &str) -> AppResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "technician" | "tech" | "technician_signature" | "techniciansignature" => {
                Ok(SignatureRole::Technician)
            }
            "operator" | "op" | "operator_signature" | "operatorsignature" => {
                Ok(SignatureRole::Operator)
            }
            other => Err(AppError::InvalidSignatureRole(other.to_string())),
        }
    }
}

/// Anything validation can attach a message to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FieldKey {
    Field(FormField),
    Signature(SignatureRole),
}

impl FieldKey {
    pub fn key(&self) -> &'static str {
        match self {
            FieldKey::Field(f) => f.key(),
            FieldKey::Signature(r) => r.key(),
        }
    }
}

impl From<FormField> for FieldKey {
    fn from(f: FormField) -> Self {
        FieldKey::Field(f)
    }
}

impl From<SignatureRole> for FieldKey {
    fn from(r: SignatureRole) -> Self {
        FieldKey::Signature(r)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
