//! In-memory document store used by tests and the demo harness.
//!
//! Implements the remote store contract faithfully: subscriptions receive
//! the full owner-scoped snapshot immediately and again after every
//! mutation. Everything runs on the caller's stack; callbacks fire
//! synchronously, which is exactly the timing that makes the liveness guard
//! in `services::live_sync` necessary.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::{
    millis_from_local, CalendarDraft, CalendarPatch, CalendarRecord, CalendarStore,
    CalendarsCallback, EventDraft, EventPatch, EventRecord, EventsCallback, StoreError,
    Unsubscribe,
};

struct Watcher<T> {
    id: u64,
    owner_id: String,
    callback: Box<dyn FnMut(Vec<T>)>,
}

#[derive(Default)]
struct Inner {
    calendars: Vec<CalendarRecord>,
    events: Vec<EventRecord>,
    calendar_watchers: Vec<Watcher<CalendarRecord>>,
    event_watchers: Vec<Watcher<EventRecord>>,
    // Ids unsubscribed while their watcher list was detached for a
    // notification pass; dropped when the list is reattached.
    retired_watchers: HashSet<u64>,
    next_id: u64,
    fail_requests: bool,
}

impl Inner {
    fn bump_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Reference [`CalendarStore`] backed by plain vectors.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every mutating call fail, to exercise the fire-and-forget path.
    pub fn set_fail_requests(&self, fail: bool) {
        self.inner.borrow_mut().fail_requests = fail;
    }

    /// Insert a calendar document directly, without notifying watchers.
    pub fn seed_calendar(&self, record: CalendarRecord) {
        self.inner.borrow_mut().calendars.push(record);
    }

    /// Insert an event document directly, without notifying watchers.
    pub fn seed_event(&self, record: EventRecord) {
        self.inner.borrow_mut().events.push(record);
    }

    /// Current stored form of an event, for inspection.
    pub fn event_record(&self, id: &str) -> Option<EventRecord> {
        self.inner
            .borrow()
            .events
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    /// Current stored form of a calendar, for inspection.
    pub fn calendar_record(&self, id: &str) -> Option<CalendarRecord> {
        self.inner
            .borrow()
            .calendars
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    /// Push the current event snapshot to every event watcher.
    pub fn notify_event_watchers(&self) {
        let (snapshot, mut watchers) = {
            let mut inner = self.inner.borrow_mut();
            (
                inner.events.clone(),
                std::mem::take(&mut inner.event_watchers),
            )
        };
        for watcher in &mut watchers {
            if self.inner.borrow().retired_watchers.contains(&watcher.id) {
                continue;
            }
            let payload: Vec<EventRecord> = snapshot
                .iter()
                .filter(|record| record.user_id == watcher.owner_id)
                .cloned()
                .collect();
            (watcher.callback)(payload);
        }
        let mut inner = self.inner.borrow_mut();
        // Watchers registered from inside a callback landed back in the
        // inner list; keep both, dropping any retired mid-notification.
        watchers.extend(std::mem::take(&mut inner.event_watchers));
        let retired = &mut inner.retired_watchers;
        watchers.retain(|watcher| !retired.remove(&watcher.id));
        inner.event_watchers = watchers;
    }

    /// Push the current calendar snapshot to every calendar watcher.
    pub fn notify_calendar_watchers(&self) {
        let (snapshot, mut watchers) = {
            let mut inner = self.inner.borrow_mut();
            (
                inner.calendars.clone(),
                std::mem::take(&mut inner.calendar_watchers),
            )
        };
        for watcher in &mut watchers {
            if self.inner.borrow().retired_watchers.contains(&watcher.id) {
                continue;
            }
            let payload: Vec<CalendarRecord> = snapshot
                .iter()
                .filter(|record| record.user_id == watcher.owner_id)
                .cloned()
                .collect();
            (watcher.callback)(payload);
        }
        let mut inner = self.inner.borrow_mut();
        watchers.extend(std::mem::take(&mut inner.calendar_watchers));
        let retired = &mut inner.retired_watchers;
        watchers.retain(|watcher| !retired.remove(&watcher.id));
        inner.calendar_watchers = watchers;
    }

    fn owner_events(&self, owner_id: &str) -> Vec<EventRecord> {
        self.inner
            .borrow()
            .events
            .iter()
            .filter(|record| record.user_id == owner_id)
            .cloned()
            .collect()
    }

    fn owner_calendars(&self, owner_id: &str) -> Vec<CalendarRecord> {
        self.inner
            .borrow()
            .calendars
            .iter()
            .filter(|record| record.user_id == owner_id)
            .cloned()
            .collect()
    }

    fn guard_availability(inner: &Inner) -> Result<(), StoreError> {
        if inner.fail_requests {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        Ok(())
    }
}

impl CalendarStore for InMemoryStore {
    fn subscribe_calendars(&self, owner_id: &str, mut on_change: CalendarsCallback) -> Unsubscribe {
        // Initial snapshot fires before the watcher is registered, matching
        // the remote store's subscribe-then-snapshot behavior.
        on_change(self.owner_calendars(owner_id));

        let watcher_id = {
            let mut inner = self.inner.borrow_mut();
            let watcher_id = inner.bump_id();
            inner.calendar_watchers.push(Watcher {
                id: watcher_id,
                owner_id: owner_id.to_string(),
                callback: on_change,
            });
            watcher_id
        };

        let inner = Rc::clone(&self.inner);
        Box::new(move || {
            let mut inner = inner.borrow_mut();
            let before = inner.calendar_watchers.len();
            inner.calendar_watchers.retain(|watcher| watcher.id != watcher_id);
            if inner.calendar_watchers.len() == before {
                inner.retired_watchers.insert(watcher_id);
            }
        })
    }

    fn subscribe_events(&self, owner_id: &str, mut on_change: EventsCallback) -> Unsubscribe {
        on_change(self.owner_events(owner_id));

        let watcher_id = {
            let mut inner = self.inner.borrow_mut();
            let watcher_id = inner.bump_id();
            inner.event_watchers.push(Watcher {
                id: watcher_id,
                owner_id: owner_id.to_string(),
                callback: on_change,
            });
            watcher_id
        };

        let inner = Rc::clone(&self.inner);
        Box::new(move || {
            let mut inner = inner.borrow_mut();
            let before = inner.event_watchers.len();
            inner.event_watchers.retain(|watcher| watcher.id != watcher_id);
            if inner.event_watchers.len() == before {
                inner.retired_watchers.insert(watcher_id);
            }
        })
    }

    fn create_calendar(&self, draft: CalendarDraft) -> Result<String, StoreError> {
        let id = {
            let mut inner = self.inner.borrow_mut();
            Self::guard_availability(&inner)?;
            let id = format!("cal-{}", inner.bump_id());
            inner.calendars.push(CalendarRecord {
                id: id.clone(),
                name: draft.name,
                color: draft.color.key().to_string(),
                user_id: draft.owner_id,
            });
            id
        };
        self.notify_calendar_watchers();
        Ok(id)
    }

    fn update_calendar(&self, id: &str, patch: CalendarPatch) -> Result<(), StoreError> {
        {
            let mut inner = self.inner.borrow_mut();
            Self::guard_availability(&inner)?;
            let record = inner
                .calendars
                .iter_mut()
                .find(|record| record.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "calendar",
                    id: id.to_string(),
                })?;
            if let Some(name) = patch.name {
                record.name = name;
            }
            if let Some(color) = patch.color {
                record.color = color.key().to_string();
            }
        }
        self.notify_calendar_watchers();
        Ok(())
    }

    fn delete_calendar(&self, id: &str) -> Result<(), StoreError> {
        {
            let mut inner = self.inner.borrow_mut();
            Self::guard_availability(&inner)?;
            // Deleting an absent document succeeds, as the remote store does.
            inner.calendars.retain(|record| record.id != id);
        }
        self.notify_calendar_watchers();
        Ok(())
    }

    fn create_event(&self, draft: EventDraft) -> Result<String, StoreError> {
        let id = {
            let mut inner = self.inner.borrow_mut();
            Self::guard_availability(&inner)?;
            let id = format!("evt-{}", inner.bump_id());
            inner.events.push(EventRecord {
                id: id.clone(),
                title: draft.title,
                start: millis_from_local(draft.start),
                end: millis_from_local(draft.end),
                kind: draft.kind,
                location: draft.location,
                meeting_url: draft.meeting_url,
                calendar_id: draft.calendar_id,
                is_live: draft.is_live,
                user_id: draft.owner_id,
            });
            id
        };
        self.notify_event_watchers();
        Ok(id)
    }

    fn update_event(&self, id: &str, patch: EventPatch) -> Result<(), StoreError> {
        {
            let mut inner = self.inner.borrow_mut();
            Self::guard_availability(&inner)?;
            let record = inner
                .events
                .iter_mut()
                .find(|record| record.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "event",
                    id: id.to_string(),
                })?;
            if let Some(title) = patch.title {
                record.title = title;
            }
            if let Some(start) = patch.start {
                record.start = millis_from_local(start);
            }
            if let Some(end) = patch.end {
                record.end = millis_from_local(end);
            }
            if let Some(kind) = patch.kind {
                record.kind = kind;
            }
            if let Some(location) = patch.location {
                record.location = Some(location);
            }
            if let Some(meeting_url) = patch.meeting_url {
                record.meeting_url = Some(meeting_url);
            }
            if let Some(calendar_id) = patch.calendar_id {
                record.calendar_id = calendar_id;
            }
            if let Some(is_live) = patch.is_live {
                record.is_live = is_live;
            }
        }
        self.notify_event_watchers();
        Ok(())
    }

    fn delete_event(&self, id: &str) -> Result<(), StoreError> {
        {
            let mut inner = self.inner.borrow_mut();
            Self::guard_availability(&inner)?;
            inner.events.retain(|record| record.id != id);
        }
        self.notify_event_watchers();
        Ok(())
    }
}
