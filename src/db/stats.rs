use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) SUBMITTED LOGS
    //
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM treatment_logs", [], |row| row.get(0))?;
    println!(
        "{}• Treatment logs:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    let pending: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM treatment_logs WHERE status = 'pending'",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Pending approval:{} {}", CYAN, RESET, pending);

    //
    // 3) DRAFTS
    //
    let drafts: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM drafts", [], |row| row.get(0))?;
    println!("{}• Stored drafts:{} {}", CYAN, RESET, drafts);

    //
    // 4) SUBMISSION RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT submitted_at FROM treatment_logs ORDER BY submitted_at ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT submitted_at FROM treatment_logs ORDER BY submitted_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Submissions:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
