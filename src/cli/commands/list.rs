use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::list_treatment_logs;
use crate::errors::AppResult;
use crate::models::catalog;
use crate::utils::colors::RESET;
use crate::utils::describe_status;
use crate::utils::formatting::litres;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { vessel } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let logs = list_treatment_logs(&pool.conn, vessel.as_deref())?;

        if logs.is_empty() {
            println!("No treatment logs submitted yet.");
            return Ok(());
        }

        let sep = cfg.separator_char.chars().next().unwrap_or('-');
        let mut table = Table::new(
            [
                "ID", "SUBMITTED", "VESSEL", "TANK", "DYE", "RATE", "QUANTITY", "DYE EST.",
                "STATUS",
            ],
            sep,
        );

        for log in &logs {
            let vessel_name = catalog::find_vessel(&log.vessel_id)
                .map(|v| v.name)
                .unwrap_or(log.vessel_id.as_str());
            let submitted = chrono::DateTime::parse_from_rfc3339(&log.submitted_at)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| log.submitted_at.clone());
            let (status, color) = describe_status(log.status);

            table.add_row(vec![
                log.id.to_string(),
                submitted,
                format!("{} ({})", vessel_name, log.vessel_id),
                log.tank_number.clone(),
                log.dye_color.clone(),
                format!("{:.2} m³/h", log.discharge_rate),
                format!("{:.2} m³", log.quantity_discharged),
                litres(log.estimated_dye),
                format!("{color}{status}{RESET}"),
            ]);
        }

        println!("📋 Submitted treatment logs:\n");
        print!("{}", table.render());
        println!("\nTotal: {}", logs.len());
    }
    Ok(())
}
