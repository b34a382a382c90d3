use super::form_field::{FormField, SignatureRole};
use serde::{Deserialize, Deserializer, Serialize};

/// `null` reads as the member's empty value, same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Field values of the treatment-log form, all kept as raw text.
/// An empty string means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreatmentFormData {
    #[serde(deserialize_with = "null_as_default")]
    pub vessel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tank_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dye_color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub discharge_rate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity_discharged: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: String,
}

impl TreatmentFormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Vessel => &self.vessel,
            FormField::TankNumber => &self.tank_number,
            FormField::DyeColor => &self.dye_color,
            FormField::DischargeRate => &self.discharge_rate,
            FormField::QuantityDischarged => &self.quantity_discharged,
            FormField::Comments => &self.comments,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Vessel => &mut self.vessel,
            FormField::TankNumber => &mut self.tank_number,
            FormField::DyeColor => &mut self.dye_color,
            FormField::DischargeRate => &mut self.discharge_rate,
            FormField::QuantityDischarged => &mut self.quantity_discharged,
            FormField::Comments => &mut self.comments,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

/// Both signatures captured on the form (encoded images, empty when unsigned).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signatures {
    pub technician: String,
    pub operator: String,
}

impl Signatures {
    pub fn get(&self, role: SignatureRole) -> &str {
        match role {
            SignatureRole::Technician => &self.technician,
            SignatureRole::Operator => &self.operator,
        }
    }

    pub fn set(&mut self, role: SignatureRole, value: String) {
        match role {
            SignatureRole::Technician => self.technician = value,
            SignatureRole::Operator => self.operator = value,
        }
    }
}

/// The persisted draft snapshot.
///
/// Serialized as `{ formData, technicianSignature, operatorSignature, timestamp }`.
/// Missing or `null` keys deserialize to empty values so older or partial
/// drafts still restore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreatmentLogDraft {
    #[serde(deserialize_with = "null_as_default")]
    pub form_data: TreatmentFormData,
    #[serde(deserialize_with = "null_as_default")]
    pub technician_signature: String,
    #[serde(deserialize_with = "null_as_default")]
    pub operator_signature: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
}

impl TreatmentLogDraft {
    pub fn new(form_data: &TreatmentFormData, signatures: &Signatures, timestamp: String) -> Self {
        Self {
            form_data: form_data.clone(),
            technician_signature: signatures.technician.clone(),
            operator_signature: signatures.operator.clone(),
            timestamp,
        }
    }

    pub fn signatures(&self) -> Signatures {
        Signatures {
            technician: self.technician_signature.clone(),
            operator: self.operator_signature.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Payload handed to the submission collaborator once validation passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentLogPayload {
    pub form_data: TreatmentFormData,
    pub technician_signature: String,
    pub operator_signature: String,
}
