//! iCalendar (RFC 5545) rendering of a single event.

use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::utils::date::Schedule;
use chrono::{DateTime, Utc};

const PRODID: &str = "-//skedjit//skedjit event//EN";
const STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

fn utc_stamp(schedule: &Schedule) -> AppResult<String> {
    schedule
        .to_utc()
        .map(|dt| dt.format(STAMP_FORMAT).to_string())
        .ok_or_else(|| AppError::Export("event date out of range".into()))
}

/// Serialize `event` as a one-event calendar, lines in fixed order.
/// Without an end date, DTEND repeats the start.
pub fn to_ics(event: &Event, stamp: DateTime<Utc>) -> AppResult<String> {
    let start = utc_stamp(&event.start)?;
    let end = match &event.end {
        Some(end) => utc_stamp(end)?,
        None => start.clone(),
    };

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        format!("PRODID:{}", PRODID),
        "VERSION:2.0".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}@skedjit", event.link()),
        format!("DTSTAMP:{}", stamp.format(STAMP_FORMAT)),
        format!("DTSTART:{}", start),
        format!("DTEND:{}", end),
        format!("SUMMARY:{}", escape_text(&event.name)),
        format!("DESCRIPTION:{}", escape_text(&event.description)),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    Ok(out)
}
