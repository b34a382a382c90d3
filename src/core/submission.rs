//! Collaborators the form controller hands control to once a log is valid:
//! the submitter that records it and the navigator that leaves the form.

use crate::core::validation::parse_positive;
use crate::db::log;
use crate::db::queries::insert_treatment_log;
use crate::errors::{AppError, AppResult};
use crate::models::catalog;
use crate::models::draft::TreatmentLogPayload;
use crate::models::treatment_log::{LogStatus, TreatmentLog};
use crate::ui::messages::{success, warning};
use chrono::Local;
use rusqlite::Connection;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Treatment log submitted successfully for approval";

/// Proof that a submission was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: i64,
    pub submitted_at: String,
}

/// Success message carried to the next view after navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait Submitter {
    /// Record the payload as a whole, or fail without side effects.
    fn submit(&mut self, payload: &TreatmentLogPayload) -> AppResult<SubmissionReceipt>;
}

pub trait Navigator {
    fn navigate(&mut self, route: &str, notice: &Notice);
}

/// Stores submitted logs in the `treatment_logs` table, status `pending`.
pub struct SqliteSubmitter<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSubmitter<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn numeric(value: &str, what: &str) -> AppResult<f64> {
    parse_positive(value).ok_or_else(|| AppError::Submission(format!("invalid {}: '{}'", what, value)))
}

impl Submitter for SqliteSubmitter<'_> {
    fn submit(&mut self, payload: &TreatmentLogPayload) -> AppResult<SubmissionReceipt> {
        let form = &payload.form_data;

        if catalog::find_vessel(&form.vessel).is_none() {
            return Err(AppError::UnknownVessel(form.vessel.clone()));
        }

        let discharge_rate = numeric(&form.discharge_rate, "discharge rate")?;
        let quantity_discharged = numeric(&form.quantity_discharged, "quantity")?;

        let mut record = TreatmentLog {
            id: 0,
            vessel_id: form.vessel.clone(),
            tank_number: form.tank_number.clone(),
            dye_color: form.dye_color.clone(),
            discharge_rate,
            quantity_discharged,
            estimated_dye: catalog::estimated_dye(&form.discharge_rate, &form.quantity_discharged),
            comments: form.comments.clone(),
            technician_signature: payload.technician_signature.clone(),
            operator_signature: payload.operator_signature.clone(),
            status: LogStatus::Pending,
            submitted_at: Local::now().to_rfc3339(),
        };

        record.id = insert_treatment_log(self.conn, &record)?;

        // audit trail (non bloccante)
        if let Err(e) = log::audit(
            self.conn,
            "submit",
            &record.vessel_id,
            &format!(
                "Treatment log #{} submitted ({} / {})",
                record.id, record.tank_number, record.dye_color
            ),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(SubmissionReceipt {
            id: record.id,
            submitted_at: record.submitted_at,
        })
    }
}

/// Navigator for terminal sessions: prints where the user lands and the notice.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    pub last_route: Option<String>,
}

impl Navigator for ConsoleNavigator {
    fn navigate(&mut self, route: &str, notice: &Notice) {
        success(&notice.message);
        println!("➡️  {}", route);
        self.last_route = Some(route.to_string());
    }
}
