use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists; it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Check if `table` has a column named `column`.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

struct Migration {
    version: &'static str,
    message: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

fn create_drafts_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS drafts (
            key        TEXT PRIMARY KEY,
            payload    TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
}

fn create_treatment_logs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS treatment_logs (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            vessel_id            TEXT NOT NULL,
            tank_number          TEXT NOT NULL,
            dye_color            TEXT NOT NULL,
            discharge_rate       REAL NOT NULL CHECK (discharge_rate > 0),
            quantity_discharged  REAL NOT NULL CHECK (quantity_discharged > 0),
            comments             TEXT NOT NULL DEFAULT '',
            technician_signature TEXT NOT NULL,
            operator_signature   TEXT NOT NULL,
            status               TEXT NOT NULL DEFAULT 'pending'
                                 CHECK (status IN ('pending','approved','rejected')),
            submitted_at         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_treatment_logs_vessel ON treatment_logs(vessel_id);
        "#,
    )
}

fn add_estimated_dye_column(conn: &Connection) -> Result<()> {
    if has_column(conn, "treatment_logs", "estimated_dye")? {
        return Ok(());
    }
    conn.execute(
        "ALTER TABLE treatment_logs ADD COLUMN estimated_dye REAL NOT NULL DEFAULT 0",
        [],
    )?;
    // backfill: 0.5 % of the discharged volume
    conn.execute(
        "UPDATE treatment_logs SET estimated_dye = ROUND(quantity_discharged * 0.005, 2)",
        [],
    )?;
    Ok(())
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250714_0001_create_drafts",
        message: "Created drafts table",
        apply: create_drafts_table,
    },
    Migration {
        version: "20250714_0002_create_treatment_logs",
        message: "Created treatment_logs table",
        apply: create_treatment_logs_table,
    },
    Migration {
        version: "20250802_0003_add_estimated_dye",
        message: "Added estimated_dye to treatment_logs",
        apply: add_estimated_dye_column,
    },
];

/// Public entry point: run all pending migrations.
///
/// Returns the versions applied by this call (empty when the schema was
/// already current). Each migration runs in its own transaction together
/// with its `migration_applied` marker.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        conn.execute_batch("BEGIN;")?;
        let step = (m.apply)(conn).and_then(|_| mark_applied(conn, m.version, m.message));
        match step {
            Ok(()) => {
                conn.execute_batch("COMMIT;")?;
                applied.push(m.version);
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK;");
                return Err(e);
            }
        }
    }

    Ok(applied)
}
