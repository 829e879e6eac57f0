//! External persistence boundary.
//!
//! The grid never talks to the remote document store directly; everything
//! goes through [`CalendarStore`]. Subscriptions deliver owner-scoped
//! snapshots of the raw stored documents, and mutations are issued
//! fire-and-forget: the grid does not wait for completion, and the display
//! only changes when the next push confirms the new state.

pub mod memory;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::calendar::{Calendar, CalendarColor};
use crate::models::event::{Event, EventKind};

/// Errors surfaced by the remote document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("remote store is unreachable: {0}")]
    Unavailable(String),
    #[error("remote store rejected the request: {0}")]
    Rejected(String),
    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: String },
}

/// Raw calendar document as stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRecord {
    pub id: String,
    pub name: String,
    pub color: String,
    pub user_id: String,
}

impl CalendarRecord {
    /// Convert to the model type. Color keys outside the palette fall back
    /// to the default, matching how unknown keys have always rendered.
    pub fn into_calendar(self) -> Calendar {
        let color = CalendarColor::parse(&self.color).unwrap_or_default();
        Calendar {
            id: self.id,
            name: self.name,
            color,
            owner_id: self.user_id,
        }
    }
}

/// Raw event document; `start` and `end` are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub start: i64,
    pub end: i64,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    pub calendar_id: String,
    pub is_live: bool,
    pub user_id: String,
}

impl EventRecord {
    /// Convert to the model type, turning stored millisecond timestamps into
    /// local wall-clock date-times. Returns `None` when a timestamp cannot
    /// be represented; the push that carried it simply drops the record.
    pub fn into_event(self) -> Option<Event> {
        let Some(start) = local_from_millis(self.start) else {
            log::warn!(
                "Event {} has unrepresentable start timestamp {}; skipping",
                self.id,
                self.start
            );
            return None;
        };
        let Some(end) = local_from_millis(self.end) else {
            log::warn!(
                "Event {} has unrepresentable end timestamp {}; skipping",
                self.id,
                self.end
            );
            return None;
        };

        Some(Event {
            id: self.id,
            title: self.title,
            start,
            end,
            kind: self.kind,
            location: self.location,
            meeting_url: self.meeting_url,
            calendar_id: self.calendar_id,
            is_live: self.is_live,
            owner_id: self.user_id,
        })
    }
}

fn local_from_millis(millis: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&Local))
}

/// Millisecond form of a local date-time, as the store persists it.
pub fn millis_from_local(t: DateTime<Local>) -> i64 {
    t.timestamp_millis()
}

/// Payload for creating an event; the store allocates the id.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub kind: EventKind,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
    pub calendar_id: String,
    pub is_live: bool,
    pub owner_id: String,
}

/// Partial event update; `None` fields are left untouched, mirroring how
/// the remote service strips absent fields before writing.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start: Option<DateTime<Local>>,
    pub end: Option<DateTime<Local>>,
    pub kind: Option<EventKind>,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
    pub calendar_id: Option<String>,
    pub is_live: Option<bool>,
}

impl EventPatch {
    /// Patch that moves an event to a new interval and changes nothing else.
    pub fn reschedule(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }
}

/// Payload for creating a calendar; the store allocates the id.
#[derive(Debug, Clone)]
pub struct CalendarDraft {
    pub name: String,
    pub color: CalendarColor,
    pub owner_id: String,
}

/// Partial calendar update.
#[derive(Debug, Clone, Default)]
pub struct CalendarPatch {
    pub name: Option<String>,
    pub color: Option<CalendarColor>,
}

/// Handle returned by a subscription; invoke it to stop receiving pushes.
pub type Unsubscribe = Box<dyn FnOnce()>;

/// Push callback for calendar collection changes.
pub type CalendarsCallback = Box<dyn FnMut(Vec<CalendarRecord>)>;

/// Push callback for event collection changes.
pub type EventsCallback = Box<dyn FnMut(Vec<EventRecord>)>;

/// The remote document store the grid talks to.
///
/// Implementations deliver owner-scoped snapshots through the subscription
/// callbacks: the current collection once on subscribe and again after every
/// change. Callbacks run on the single UI thread; a push may already be in
/// flight when an unsubscribe executes, which is why consumers guard their
/// callbacks (see `services::live_sync`).
pub trait CalendarStore {
    fn subscribe_calendars(&self, owner_id: &str, on_change: CalendarsCallback) -> Unsubscribe;
    fn subscribe_events(&self, owner_id: &str, on_change: EventsCallback) -> Unsubscribe;

    fn create_calendar(&self, draft: CalendarDraft) -> Result<String, StoreError>;
    fn update_calendar(&self, id: &str, patch: CalendarPatch) -> Result<(), StoreError>;
    fn delete_calendar(&self, id: &str) -> Result<(), StoreError>;

    fn create_event(&self, draft: EventDraft) -> Result<String, StoreError>;
    fn update_event(&self, id: &str, patch: EventPatch) -> Result<(), StoreError>;
    fn delete_event(&self, id: &str) -> Result<(), StoreError>;
}

/// Issue a create without waiting on the outcome. Failures are logged and
/// dropped; the view corrects itself on the next successful push.
pub fn dispatch_create_event(store: &dyn CalendarStore, draft: EventDraft) {
    if let Err(err) = store.create_event(draft) {
        log::error!("Failed to create event: {}", err);
    }
}

/// Issue a delete without waiting on the outcome.
pub fn dispatch_delete_event(store: &dyn CalendarStore, id: &str) {
    if let Err(err) = store.delete_event(id) {
        log::error!("Failed to delete event {}: {}", id, err);
    }
}
