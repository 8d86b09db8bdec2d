//! Date/time codec: form fields (year, month, day, hour, minute, am/pm,
//! timezone) to a naive instant plus offset, and back.

use crate::errors::{AppError, AppResult};
use crate::models::meridiem::Meridiem;
use crate::models::tz_offset::{MAX_OFFSET_HOURS, MIN_OFFSET_HOURS, TzOffset};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::Serialize;
use std::fmt;

/// Storage format of naive instants.
pub const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Raw date/time fields as they arrive from a form.
#[derive(Debug, Clone, Default)]
pub struct DateTimeInput {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub hour: Option<String>,
    pub minute: Option<String>,
    pub ampm: Option<String>,
    pub timezone: Option<String>,
}

impl DateTimeInput {
    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.hour.is_none()
            && self.minute.is_none()
            && self.ampm.is_none()
            && self.timezone.is_none()
    }
}

/// A naive calendar instant and the offset it was entered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub instant: NaiveDateTime,
    pub offset: TzOffset,
}

impl Schedule {
    /// The instant on the UTC timeline, if representable.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.instant
            .checked_sub_signed(self.offset.as_delta())
            .map(|dt| dt.and_utc())
    }
}

/// Date/time fields as shown back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
    pub tz_offset: i32,
}

impl fmt::Display for DisplayDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02} {} UTC{:+}",
            self.year, self.month, self.day, self.hour, self.minute, self.meridiem, self.tz_offset
        )
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> AppResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| AppError::Validation(format!("missing field '{}'", field)))
}

fn number<T: std::str::FromStr>(value: &Option<String>, field: &str) -> AppResult<T> {
    let raw = required(value, field)?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::Validation(format!("field '{}' is not a number: '{}'", field, raw)))
}

/// Validate and normalize form fields into a [`Schedule`].
///
/// "PM" adds 12 to the entered hour before the instant is built, so
/// 12 PM yields hour 24 and is rejected.
pub fn encode(input: &DateTimeInput) -> AppResult<Schedule> {
    let year: i32 = number(&input.year, "year")?;
    let month: u32 = number(&input.month, "month")?;
    let day: u32 = number(&input.day, "day")?;
    let mut hour: u32 = number(&input.hour, "hour")?;
    let minute: u32 = number(&input.minute, "minute")?;

    let ampm = required(&input.ampm, "ampm")?;
    let meridiem = Meridiem::from_input(ampm)
        .ok_or_else(|| AppError::Validation(format!("ampm must be AM or PM, got '{}'", ampm)))?;

    let hours: i32 = number(&input.timezone, "timezone")?;
    let offset = TzOffset::new(hours).ok_or_else(|| {
        AppError::Validation(format!(
            "timezone must be between {} and {}, got {}",
            MIN_OFFSET_HOURS, MAX_OFFSET_HOURS, hours
        ))
    })?;

    if meridiem == Meridiem::Pm {
        hour = hour.saturating_add(12);
    }

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        AppError::Validation(format!("no such date: {:04}-{:02}-{:02}", year, month, day))
    })?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        AppError::Validation(format!("no such time: {:02}:{:02}", hour, minute))
    })?;

    let schedule = Schedule {
        instant: date.and_time(time),
        offset,
    };

    if schedule.to_utc().is_none() {
        return Err(AppError::Validation("date is out of range".into()));
    }

    Ok(schedule)
}

/// Inverse of [`encode`]: the hour is returned as stored (0-23) and the
/// meridiem is derived from it.
pub fn decode(schedule: &Schedule) -> DisplayDateTime {
    let instant = schedule.instant;
    DisplayDateTime {
        year: instant.year(),
        month: instant.month(),
        day: instant.day(),
        hour: instant.hour(),
        minute: instant.minute(),
        meridiem: Meridiem::of_hour(instant.hour()),
        tz_offset: schedule.offset.hours(),
    }
}

pub fn format_instant(instant: &NaiveDateTime) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}

pub fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, INSTANT_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        year: &str,
        month: &str,
        day: &str,
        hour: &str,
        minute: &str,
        ampm: &str,
        tz: &str,
    ) -> DateTimeInput {
        DateTimeInput {
            year: Some(year.into()),
            month: Some(month.into()),
            day: Some(day.into()),
            hour: Some(hour.into()),
            minute: Some(minute.into()),
            ampm: Some(ampm.into()),
            timezone: Some(tz.into()),
        }
    }

    #[test]
    fn encodes_morning_date() {
        let s = encode(&input("2017", "12", "12", "10", "00", "am", "-5")).unwrap();
        assert_eq!(format_instant(&s.instant), "2017-12-12T10:00:00");
        assert_eq!(s.offset.hours(), -5);
    }

    #[test]
    fn pm_adds_twelve_hours() {
        let s = encode(&input("2017", "12", "12", "3", "30", "PM", "0")).unwrap();
        assert_eq!(format_instant(&s.instant), "2017-12-12T15:30:00");
    }

    #[test]
    fn twelve_pm_is_rejected() {
        let err = encode(&input("2017", "12", "12", "12", "00", "pm", "0")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn twelve_am_is_noon() {
        let s = encode(&input("2017", "12", "12", "12", "00", "am", "0")).unwrap();
        assert_eq!(decode(&s).hour, 12);
        assert_eq!(decode(&s).meridiem, Meridiem::Pm);
    }

    #[test]
    fn every_missing_field_is_invalid() {
        let full = input("2017", "12", "12", "10", "00", "am", "-5");
        let strip: [fn(&mut DateTimeInput); 7] = [
            |i| i.year = None,
            |i| i.month = None,
            |i| i.day = None,
            |i| i.hour = None,
            |i| i.minute = None,
            |i| i.ampm = None,
            |i| i.timezone = None,
        ];
        for f in strip {
            let mut i = full.clone();
            f(&mut i);
            assert!(encode(&i).is_err());
        }
    }

    #[test]
    fn malformed_fields_are_invalid() {
        assert!(encode(&input("twenty", "12", "12", "10", "00", "am", "0")).is_err());
        assert!(encode(&input("2017", "12", "12", "10", "xx", "am", "0")).is_err());
        assert!(encode(&input("2017", "12", "12", "10", "00", "noon", "0")).is_err());
        assert!(encode(&input("2017", "12", "12", "10", "00", "am", "-13")).is_err());
        assert!(encode(&input("2017", "12", "12", "10", "00", "am", "15")).is_err());
        assert!(encode(&input("2017", "02", "30", "10", "00", "am", "0")).is_err());
        assert!(encode(&input("2017", "12", "12", "10", "61", "am", "0")).is_err());
    }

    #[test]
    fn offset_bounds_are_accepted() {
        assert!(encode(&input("2017", "12", "12", "10", "00", "am", "-12")).is_ok());
        assert!(encode(&input("2017", "12", "12", "10", "00", "am", "14")).is_ok());
    }

    #[test]
    fn decode_reproduces_entered_fields() {
        for hour in 1..=11u32 {
            for (ampm, tz) in [("AM", -12), ("AM", 0), ("PM", 5), ("PM", 14)] {
                let s = encode(&input(
                    "2020",
                    "2",
                    "29",
                    &hour.to_string(),
                    "45",
                    ampm,
                    &tz.to_string(),
                ))
                .unwrap();
                let d = decode(&s);
                let expected_hour = if ampm == "PM" { hour + 12 } else { hour };
                assert_eq!((d.year, d.month, d.day), (2020, 2, 29));
                assert_eq!(d.hour, expected_hour);
                assert_eq!(d.minute, 45);
                assert_eq!(d.meridiem.as_str(), ampm);
                assert_eq!(d.tz_offset, tz);
            }
        }
    }

    #[test]
    fn utc_conversion_applies_offset() {
        let s = encode(&input("2017", "12", "12", "10", "00", "am", "-5")).unwrap();
        let utc = s.to_utc().unwrap();
        assert_eq!(utc.format("%Y%m%dT%H%M%SZ").to_string(), "20171212T150000Z");
    }

    #[test]
    fn display_is_readable() {
        let s = encode(&input("2017", "12", "12", "10", "05", "am", "-5")).unwrap();
        assert_eq!(decode(&s).to_string(), "2017-12-12 10:05 AM UTC-5");
    }
}
