use crate::errors::{AppError, AppResult};
use crate::models::treatment_log::{LogStatus, TreatmentLog};
use rusqlite::{Connection, Result, Row, ToSql, params};

/// Insert a submitted treatment log and return its id.
pub fn insert_treatment_log(conn: &Connection, log: &TreatmentLog) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO treatment_logs
            (vessel_id, tank_number, dye_color, discharge_rate, quantity_discharged,
             estimated_dye, comments, technician_signature, operator_signature,
             status, submitted_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )?;

    stmt.execute(params![
        log.vessel_id,
        log.tank_number,
        log.dye_color,
        log.discharge_rate,
        log.quantity_discharged,
        log.estimated_dye,
        log.comments,
        log.technician_signature,
        log.operator_signature,
        log.status.to_db_str(),
        log.submitted_at,
    ])?;

    Ok(conn.last_insert_rowid())
}

pub fn map_row(row: &Row) -> Result<TreatmentLog> {
    let status_str: String = row.get("status")?;
    let status = LogStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid status: {}", status_str))),
        )
    })?;

    Ok(TreatmentLog {
        id: row.get("id")?,
        vessel_id: row.get("vessel_id")?,
        tank_number: row.get("tank_number")?,
        dye_color: row.get("dye_color")?,
        discharge_rate: row.get("discharge_rate")?,
        quantity_discharged: row.get("quantity_discharged")?,
        estimated_dye: row.get("estimated_dye")?,
        comments: row.get("comments")?,
        technician_signature: row.get("technician_signature")?,
        operator_signature: row.get("operator_signature")?,
        status,
        submitted_at: row.get("submitted_at")?,
    })
}

/// Return submitted logs, newest first, optionally for a single vessel.
pub fn list_treatment_logs(conn: &Connection, vessel: Option<&str>) -> AppResult<Vec<TreatmentLog>> {
    let mut sql = String::from("SELECT * FROM treatment_logs");
    let mut params: Vec<&dyn ToSql> = Vec::new();

    if let Some(v) = &vessel {
        sql.push_str(" WHERE vessel_id = ?1");
        params.push(v);
    }
    sql.push_str(" ORDER BY id DESC");

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params.as_slice(), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_treatment_logs(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM treatment_logs", [], |row| row.get(0))?;
    Ok(n)
}
