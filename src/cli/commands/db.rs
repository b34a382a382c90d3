use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};
use rusqlite::Connection;

fn migrate(conn: &Connection) -> AppResult<()> {
    info("Running migrations…");
    let applied = init_db(conn)?;
    if applied.is_empty() {
        println!("Schema already up to date.");
    }
    for v in applied {
        println!("  • {}", v);
    }
    success("Migration completed.");
    Ok(())
}

/// `PRAGMA integrity_check` plus a look for drafts that no longer parse.
fn check(conn: &Connection) -> AppResult<()> {
    info("Running integrity check…");

    let integrity: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity == "ok" {
        success("Integrity check passed.");
    } else {
        error(format!("Integrity check failed: {}", integrity));
    }

    let mut stmt = conn.prepare("SELECT key, payload FROM drafts")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
    for r in rows {
        let (key, payload) = r?;
        if serde_json::from_str::<serde_json::Value>(&payload).is_err() {
            // the form ignores it on mount; the next save overwrites it
            error(format!("Draft '{}' is not valid JSON", key));
        }
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate: run_migrate,
        check: run_check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *run_migrate {
            migrate(&pool.conn)?;
        }

        if *show_info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        if *run_check {
            check(&pool.conn)?;
        }

        if *vacuum {
            info("Running VACUUM…");
            pool.conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}
