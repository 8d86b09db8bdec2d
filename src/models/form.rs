//! Raw request payloads, before any validation.

use crate::utils::date::DateTimeInput;

/// Fields of a creation request.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub access: Option<String>,
    pub start: DateTimeInput,
    /// Optional end; leave every field empty to omit it
    pub end: DateTimeInput,
}

/// Fields of an update request. Absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start: DateTimeInput,
    pub end: DateTimeInput,
    /// Drop the end date altogether
    pub clear_end: bool,
}

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start.is_empty()
            && self.end.is_empty()
            && !self.clear_end
    }
}
