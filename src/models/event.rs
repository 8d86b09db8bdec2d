use crate::core::access;
use crate::core::link::LinkGenerator;
use crate::errors::{AppError, AppResult};
use crate::models::form::{EventChanges, EventForm};
use crate::utils::date::{self, DateTimeInput, DisplayDateTime, Schedule};
use chrono::Local;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Event {
    pub id: i64,                    // ⇔ events.id (0 until persisted)
    pub(crate) link: String,        // ⇔ events.link (UNIQUE)
    pub name: String,               // ⇔ events.name
    pub description: String,        // ⇔ events.description (default '')
    pub start: Schedule,            // ⇔ events.start_at + start_offset
    pub end: Option<Schedule>,      // ⇔ events.end_at + end_offset (nullable)
    pub(crate) access_hash: String, // ⇔ events.access_hash (bcrypt)
    pub created_at: String,         // ⇔ events.created_at (ISO8601)
}

/// What a reader of the event gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    pub link: String,
    pub name: String,
    pub description: String,
    pub start: DisplayDateTime,
    pub end: Option<DisplayDateTime>,
}

fn valid_name(name: Option<&str>) -> AppResult<String> {
    match name {
        Some(n) if !n.trim().is_empty() => Ok(n.to_string()),
        _ => Err(AppError::Validation("event name must be provided".into())),
    }
}

fn optional_schedule(input: &DateTimeInput) -> AppResult<Option<Schedule>> {
    if input.is_empty() {
        Ok(None)
    } else {
        date::encode(input).map(Some)
    }
}

fn check_order(start: &Schedule, end: Option<&Schedule>) -> AppResult<()> {
    if let Some(end) = end
        && end.to_utc() < start.to_utc()
    {
        return Err(AppError::Validation(
            "event end must not be before its start".into(),
        ));
    }
    Ok(())
}

impl Event {
    /// Build a new, not yet persisted event from a creation request.
    ///
    /// Requires a name, an access code and a complete start date; the end
    /// date and the description are optional.
    pub fn construct(form: &EventForm, links: &dyn LinkGenerator, cost: u32) -> AppResult<Self> {
        let name = valid_name(form.name.as_deref())?;

        if form.start.is_empty() {
            return Err(AppError::Validation("start date must be provided".into()));
        }
        let start = date::encode(&form.start)?;
        let end = optional_schedule(&form.end)?;
        check_order(&start, end.as_ref())?;

        let secret = match form.access.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => return Err(AppError::MissingAccess),
        };

        Ok(Self {
            id: 0,
            link: links.generate(),
            name,
            description: form.description.clone().unwrap_or_default(),
            start,
            end,
            access_hash: access::hash(secret, cost)?,
            created_at: Local::now().to_rfc3339(),
        })
    }

    /// Replace the supplied fields. Link and access hash are never touched;
    /// nothing changes if any supplied field is invalid.
    pub fn update(&mut self, changes: &EventChanges) -> AppResult<()> {
        let name = match &changes.name {
            Some(n) => Some(valid_name(Some(n))?),
            None => None,
        };
        if changes.clear_end && !changes.end.is_empty() {
            return Err(AppError::Validation(
                "an end date cannot be set and cleared at once".into(),
            ));
        }
        let start = optional_schedule(&changes.start)?.unwrap_or(self.start);
        let end = if changes.clear_end {
            None
        } else {
            optional_schedule(&changes.end)?.or(self.end)
        };
        check_order(&start, end.as_ref())?;

        if let Some(n) = name {
            self.name = n;
        }
        if let Some(d) = &changes.description {
            self.description = d.clone();
        }
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Draw a new link for an event that has not been stored yet.
    pub(crate) fn relink(&mut self, links: &dyn LinkGenerator) {
        debug_assert_eq!(self.id, 0, "a stored event keeps its link");
        self.link = links.generate();
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn access_hash(&self) -> &str {
        &self.access_hash
    }

    /// Path the web front end serves this event under.
    pub fn location(&self) -> String {
        format!("/event/{}", self.link)
    }

    pub fn view(&self) -> EventView {
        EventView {
            link: self.link.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            start: date::decode(&self.start),
            end: self.end.as_ref().map(date::decode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meridiem::Meridiem;
    use std::cell::Cell;

    struct Counter(Cell<u32>);

    impl LinkGenerator for Counter {
        fn generate(&self) -> String {
            let n = self.0.get() + 1;
            self.0.set(n);
            format!("link{:02}", n)
        }
    }

    fn when(hour: &str, ampm: &str, tz: &str) -> DateTimeInput {
        DateTimeInput {
            year: Some("2017".into()),
            month: Some("12".into()),
            day: Some("12".into()),
            hour: Some(hour.into()),
            minute: Some("00".into()),
            ampm: Some(ampm.into()),
            timezone: Some(tz.into()),
        }
    }

    fn form() -> EventForm {
        EventForm {
            name: Some("My Wonderful Event".into()),
            description: Some("This event will change the world!".into()),
            access: Some("access".into()),
            start: when("10", "am", "-5"),
            end: DateTimeInput::default(),
        }
    }

    #[test]
    fn construct_assigns_link_and_hashes_access() {
        let links = Counter(Cell::new(0));
        let ev = Event::construct(&form(), &links, 4).unwrap();
        assert_eq!(ev.link(), "link01");
        assert_eq!(ev.id, 0);
        assert_ne!(ev.access_hash(), "access");
        assert!(access::verify(ev.access_hash(), "access"));
        assert_eq!(ev.location(), "/event/link01");
        assert!(ev.end.is_none());
    }

    #[test]
    fn construct_requires_name_start_and_access() {
        let links = Counter(Cell::new(0));

        let mut f = form();
        f.name = None;
        assert!(matches!(Event::construct(&f, &links, 4), Err(AppError::Validation(_))));

        let mut f = form();
        f.name = Some("   ".into());
        assert!(matches!(Event::construct(&f, &links, 4), Err(AppError::Validation(_))));

        let mut f = form();
        f.start = DateTimeInput::default();
        assert!(matches!(Event::construct(&f, &links, 4), Err(AppError::Validation(_))));

        let mut f = form();
        f.access = None;
        assert!(matches!(Event::construct(&f, &links, 4), Err(AppError::MissingAccess)));

        assert_eq!(links.0.get(), 0, "no link drawn for rejected input");
    }

    #[test]
    fn partial_end_date_is_invalid() {
        let mut f = form();
        f.end.year = Some("2017".into());
        assert!(Event::construct(&f, &Counter(Cell::new(0)), 4).is_err());
    }

    #[test]
    fn end_before_start_is_invalid() {
        let mut f = form();
        // 09:00 at UTC-5 is before 10:00 at UTC-5
        f.end = when("9", "am", "-5");
        assert!(Event::construct(&f, &Counter(Cell::new(0)), 4).is_err());

        // 09:00 at UTC-7 is 16:00 UTC, after 15:00 UTC
        f.end = when("9", "am", "-7");
        assert!(Event::construct(&f, &Counter(Cell::new(0)), 4).is_ok());
    }

    #[test]
    fn update_replaces_only_supplied_fields() {
        let mut ev = Event::construct(&form(), &Counter(Cell::new(0)), 4).unwrap();
        let hash_before = ev.access_hash().to_string();

        ev.update(&EventChanges {
            name: Some("Updated Event Name".into()),
            ..EventChanges::default()
        })
        .unwrap();

        assert_eq!(ev.name, "Updated Event Name");
        assert_eq!(ev.description, "This event will change the world!");
        assert_eq!(ev.link(), "link01");
        assert_eq!(ev.access_hash(), hash_before);
        assert_eq!(ev.view().start.hour, 10);
    }

    #[test]
    fn invalid_update_leaves_event_untouched() {
        let mut ev = Event::construct(&form(), &Counter(Cell::new(0)), 4).unwrap();
        let mut start = when("3", "pm", "0");
        start.timezone = Some("20".into());

        let err = ev
            .update(&EventChanges {
                name: Some("changed".into()),
                start,
                ..EventChanges::default()
            })
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(ev.name, "My Wonderful Event");
    }

    #[test]
    fn end_date_can_be_cleared() {
        let mut f = form();
        f.end = when("11", "am", "-5");
        let mut ev = Event::construct(&f, &Counter(Cell::new(0)), 4).unwrap();
        assert!(ev.end.is_some());

        let both = EventChanges {
            end: when("11", "am", "-5"),
            clear_end: true,
            ..EventChanges::default()
        };
        assert!(matches!(ev.update(&both), Err(AppError::Validation(_))));
        assert!(ev.end.is_some());

        ev.update(&EventChanges {
            clear_end: true,
            ..EventChanges::default()
        })
        .unwrap();
        assert!(ev.end.is_none());
        assert!(ev.view().end.is_none());
    }

    #[test]
    fn view_decodes_schedule() {
        let ev = Event::construct(&form(), &Counter(Cell::new(0)), 4).unwrap();
        let v = ev.view();
        assert_eq!(v.link, "link01");
        assert_eq!((v.start.year, v.start.month, v.start.day), (2017, 12, 12));
        assert_eq!(v.start.meridiem, Meridiem::Am);
        assert_eq!(v.start.tz_offset, -5);
    }

    #[test]
    fn relink_draws_a_fresh_token() {
        let links = Counter(Cell::new(0));
        let mut ev = Event::construct(&form(), &links, 4).unwrap();
        ev.relink(&links);
        assert_eq!(ev.link(), "link02");
    }
}
