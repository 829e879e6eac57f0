// Event module
// Calendar event model fed by the live store subscriptions

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

use crate::models::calendar::{Calendar, CalendarColor};

/// How an event is attended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "in-person")]
    InPerson,
    #[serde(rename = "online")]
    Online,
}

/// Calendar event owned by a single user.
///
/// The interval is half-open `[start, end)` in local wall-clock time. The
/// grid assumes `end > start` and a valid `calendar_id`; both are enforced
/// at the persistence boundary, not re-checked during layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub kind: EventKind,
    /// Meeting place; only meaningful for in-person events.
    pub location: Option<String>,
    /// Join link; only meaningful for online events.
    pub meeting_url: Option<String>,
    pub calendar_id: String,
    pub is_live: bool,
    pub owner_id: String,
}

impl Event {
    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if self.end <= self.start {
            return Err("Event end time must be after start time".to_string());
        }

        Ok(())
    }

    /// Get the duration of the event
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Palette key of the owning calendar, falling back to the default when
    /// the calendar is not (yet) present in the pushed collection.
    pub fn color(&self, calendars: &[Calendar]) -> CalendarColor {
        calendars
            .iter()
            .find(|calendar| calendar.id == self.calendar_id)
            .map(|calendar| calendar.color)
            .unwrap_or_default()
    }
}
