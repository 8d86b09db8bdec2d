use rusqlite::{Connection, OptionalExtension, Result, Transaction, TransactionBehavior};

/// Ensure that the `log` table exists.
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

/// Schema changes applied after the `log` table, in order. The `events`
/// table carries the UNIQUE `link` constraint that link collisions are
/// detected through.
const MIGRATIONS: &[(&str, &str, &str)] = &[(
    "0001_create_events",
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        link         TEXT NOT NULL UNIQUE,
        name         TEXT NOT NULL,
        description  TEXT NOT NULL DEFAULT '',
        start_at     TEXT NOT NULL,
        start_offset INTEGER NOT NULL CHECK(start_offset BETWEEN -12 AND 14),
        end_at       TEXT,
        end_offset   INTEGER CHECK(end_offset BETWEEN -12 AND 14),
        access_hash  TEXT NOT NULL,
        created_at   TEXT NOT NULL
    );
    "#,
    "Created events table",
)];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, version: &str, sql: &str, message: &str) -> Result<()> {
    conn.execute_batch(sql)?;
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    log::info!("Migration applied: {}", version);
    Ok(())
}

/// Public entry point: run all pending migrations. Safe to call on every start.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, sql, message) in MIGRATIONS {
        // checked under the write lock: two processes may start at once
        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
        if !is_applied(&tx, version)? {
            apply(&tx, version, sql, message)?;
        }
        tx.commit()?;
    }

    Ok(())
}
