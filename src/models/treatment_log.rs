use serde::Serialize;

/// Approval status of a submitted treatment log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogStatus {
    Pending,  // awaiting supervisor approval
    Approved,
    Rejected,
}

impl LogStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LogStatus::Pending => "pending",
            LogStatus::Approved => "approved",
            LogStatus::Rejected => "rejected",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(LogStatus::Pending),
            "approved" => Some(LogStatus::Approved),
            "rejected" => Some(LogStatus::Rejected),
            _ => None,
        }
    }
}

/// A treatment log accepted by the submission collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct TreatmentLog {
    pub id: i64,
    pub vessel_id: String,
    pub tank_number: String,
    pub dye_color: String,
    pub discharge_rate: f64,     // m³/h
    pub quantity_discharged: f64, // m³
    pub estimated_dye: f64,      // litres
    pub comments: String,
    pub technician_signature: String,
    pub operator_signature: String,
    pub status: LogStatus,
    pub submitted_at: String, // ISO 8601
}
