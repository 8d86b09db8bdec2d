use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::tz_offset::TzOffset;
use crate::utils::date::{Schedule, format_instant, parse_instant};
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params};

const EVENT_COLUMNS: &str = "id, link, name, description, start_at, start_offset, end_at, end_offset, access_hash, created_at";

fn conversion_error(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(AppError::Other(msg)))
}

fn schedule_from(row: &Row, at: &str, offset: &str) -> Result<Option<Schedule>> {
    let raw: Option<String> = row.get(at)?;
    let hours: Option<i32> = row.get(offset)?;

    match (raw, hours) {
        (Some(raw), Some(hours)) => {
            let idx = row.as_ref().column_index(at)?;
            let instant = parse_instant(&raw)
                .ok_or_else(|| conversion_error(idx, format!("Invalid instant: {}", raw)))?;
            let offset = TzOffset::new(hours)
                .ok_or_else(|| conversion_error(idx, format!("Invalid offset: {}", hours)))?;
            Ok(Some(Schedule { instant, offset }))
        }
        _ => Ok(None),
    }
}

pub fn map_row(row: &Row) -> Result<Event> {
    let start = schedule_from(row, "start_at", "start_offset")?
        .ok_or_else(|| conversion_error(0, "Event without start date".into()))?;

    Ok(Event {
        id: row.get("id")?,
        link: row.get("link")?,
        name: row.get("name")?,
        description: row.get("description")?,
        start,
        end: schedule_from(row, "end_at", "end_offset")?,
        access_hash: row.get("access_hash")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a new event and return its row id.
pub fn insert_event(conn: &Connection, ev: &Event) -> Result<i64> {
    conn.execute(
        "INSERT INTO events (link, name, description, start_at, start_offset, end_at, end_offset, access_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            ev.link(),
            ev.name,
            ev.description,
            format_instant(&ev.start.instant),
            ev.start.offset.hours(),
            ev.end.as_ref().map(|s| format_instant(&s.instant)),
            ev.end.as_ref().map(|s| s.offset.hours()),
            ev.access_hash(),
            ev.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update the mutable fields of an event. Link and access hash are not written.
pub fn update_event(conn: &Connection, ev: &Event) -> AppResult<()> {
    conn.execute(
        "UPDATE events
         SET name = ?1, description = ?2,
             start_at = ?3, start_offset = ?4,
             end_at = ?5, end_offset = ?6
         WHERE id = ?7",
        params![
            ev.name,
            ev.description,
            format_instant(&ev.start.instant),
            ev.start.offset.hours(),
            ev.end.as_ref().map(|s| format_instant(&s.instant)),
            ev.end.as_ref().map(|s| s.offset.hours()),
            ev.id,
        ],
    )?;
    Ok(())
}

pub fn find_by_link(conn: &Connection, link: &str) -> AppResult<Option<Event>> {
    let sql = format!("SELECT {} FROM events WHERE link = ?1", EVENT_COLUMNS);
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([link], map_row).optional()?)
}

pub fn delete_event(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM events WHERE id = ?", [id])?;
    Ok(())
}

pub fn count_events(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
}

/// True when the error is the UNIQUE constraint on `events.link`.
pub fn is_link_collision(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, msg) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && msg.as_deref().is_some_and(|m| m.contains("events.link"))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        conn
    }

    fn insert_raw(conn: &Connection, link: &str) -> Result<usize> {
        conn.execute(
            "INSERT INTO events (link, name, start_at, start_offset, access_hash, created_at)
             VALUES (?1, 'n', '2017-12-12T10:00:00', -5, 'h', 'now')",
            [link],
        )
    }

    #[test]
    fn duplicate_link_is_a_collision() {
        let conn = conn();
        insert_raw(&conn, "abcdef").unwrap();
        let err = insert_raw(&conn, "abcdef").unwrap_err();
        assert!(is_link_collision(&err));
    }

    #[test]
    fn other_constraint_failures_are_not_collisions() {
        let conn = conn();
        let err = conn
            .execute(
                "INSERT INTO events (link, name, start_at, start_offset, access_hash, created_at)
                 VALUES ('abcdef', NULL, '2017-12-12T10:00:00', 0, 'h', 'now')",
                [],
            )
            .unwrap_err();
        assert!(!is_link_collision(&err));
        assert!(!is_link_collision(&rusqlite::Error::QueryReturnedNoRows));
    }

    #[test]
    fn row_without_end_maps_to_none() {
        let conn = conn();
        insert_raw(&conn, "abcdef").unwrap();
        let ev = find_by_link(&conn, "abcdef").unwrap().unwrap();
        assert_eq!(ev.link(), "abcdef");
        assert!(ev.end.is_none());
        assert_eq!(ev.start.offset.hours(), -5);
        assert!(find_by_link(&conn, "zzzzzz").unwrap().is_none());
    }
}
