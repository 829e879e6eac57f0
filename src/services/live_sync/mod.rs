//! Live subscription management.
//!
//! Holds the last pushed calendar/event collections for one owner identity
//! and guards against the push-after-teardown race: an asynchronous push may
//! already be in flight when a subscription is torn down, and without a
//! guard its payload would overwrite the view with a destroyed view's (or
//! another owner's) data.

use std::cell::{Cell, RefCell};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::calendar::Calendar;
use crate::models::event::Event;
use crate::services::store::{CalendarRecord, CalendarStore, EventRecord, Unsubscribe};

/// Owning handle for one push subscription.
///
/// The liveness flag is flipped false synchronously as the first step of
/// teardown, strictly before the store's unsubscribe runs. Every push
/// callback checks the flag before touching shared state, so a callback that
/// fires during or after teardown is discarded.
pub struct SubscriptionHandle {
    live: Rc<Cell<bool>>,
    unsubscribe: Option<Unsubscribe>,
}

impl SubscriptionHandle {
    fn establish(live: Rc<Cell<bool>>, unsubscribe: Unsubscribe) -> Self {
        Self {
            live,
            unsubscribe: Some(unsubscribe),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    /// Invalidate the guard, then detach from the store.
    pub fn teardown(&mut self) {
        self.live.set(false);
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Immutable collections input for one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionsSnapshot {
    pub calendars: Vec<Calendar>,
    pub events: Vec<Event>,
}

/// Maintains the two owner-scoped push subscriptions and the collections
/// they feed. The collections are replaced wholesale on every push; between
/// pushes they are immutable.
#[derive(Default)]
pub struct LiveSyncManager {
    owner_id: Option<String>,
    calendars: Rc<RefCell<Vec<Calendar>>>,
    events: Rc<RefCell<Vec<Event>>>,
    calendar_sub: Option<SubscriptionHandle>,
    event_sub: Option<SubscriptionHandle>,
}

impl LiveSyncManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    /// Switch the manager to a new owner identity (login, logout, account
    /// switch). Existing subscriptions are torn down before new ones are
    /// established; there is never a window with both owners attached.
    /// Passing the current owner is a no-op.
    pub fn set_owner(&mut self, store: &dyn CalendarStore, owner_id: Option<&str>) {
        if self.owner_id.as_deref() == owner_id {
            return;
        }

        self.detach();

        let Some(owner) = owner_id else {
            return;
        };
        log::info!("Attaching live subscriptions for owner {}", owner);
        self.owner_id = Some(owner.to_string());
        self.calendar_sub = Some(self.subscribe_calendars(store, owner));
        self.event_sub = Some(self.subscribe_events(store, owner));
    }

    /// Tear down both subscriptions. The last pushed collections stay in
    /// place until a new owner's first push replaces them.
    pub fn detach(&mut self) {
        if let Some(mut sub) = self.event_sub.take() {
            sub.teardown();
        }
        if let Some(mut sub) = self.calendar_sub.take() {
            sub.teardown();
        }
        self.owner_id = None;
    }

    pub fn calendars(&self) -> Vec<Calendar> {
        self.calendars.borrow().clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// One consistent copy of both collections for a render pass.
    pub fn snapshot(&self) -> CollectionsSnapshot {
        CollectionsSnapshot {
            calendars: self.calendars(),
            events: self.events(),
        }
    }

    fn subscribe_calendars(&self, store: &dyn CalendarStore, owner: &str) -> SubscriptionHandle {
        let live = Rc::new(Cell::new(true));
        let guard = Rc::clone(&live);
        let target = Rc::clone(&self.calendars);
        let unsubscribe = store.subscribe_calendars(
            owner,
            Box::new(move |records| {
                if !guard.get() {
                    log::debug!("Discarding calendar push received after teardown");
                    return;
                }
                *target.borrow_mut() = collect_calendars(records);
            }),
        );
        SubscriptionHandle::establish(live, unsubscribe)
    }

    fn subscribe_events(&self, store: &dyn CalendarStore, owner: &str) -> SubscriptionHandle {
        let live = Rc::new(Cell::new(true));
        let guard = Rc::clone(&live);
        let target = Rc::clone(&self.events);
        let unsubscribe = store.subscribe_events(
            owner,
            Box::new(move |records| {
                if !guard.get() {
                    log::debug!("Discarding event push received after teardown");
                    return;
                }
                let events = collect_events(records);
                log::debug!("Event push applied ({} events)", events.len());
                *target.borrow_mut() = events;
            }),
        );
        SubscriptionHandle::establish(live, unsubscribe)
    }
}

/// Convert one pushed calendar payload, deduplicating by id.
fn collect_calendars(records: Vec<CalendarRecord>) -> Vec<Calendar> {
    dedupe_last_wins(
        records
            .into_iter()
            .map(CalendarRecord::into_calendar)
            .collect(),
        |calendar: &Calendar| calendar.id.clone(),
    )
}

/// Convert one pushed event payload. Records whose stored timestamps do not
/// convert are dropped by `into_event`; duplicates collapse by id.
fn collect_events(records: Vec<EventRecord>) -> Vec<Event> {
    dedupe_last_wins(
        records
            .into_iter()
            .filter_map(EventRecord::into_event)
            .collect(),
        |event: &Event| event.id.clone(),
    )
}

/// Within a single payload the last write for an id wins; ordering of the
/// surviving items is otherwise irrelevant to the views.
fn dedupe_last_wins<T>(items: Vec<T>, id_of: impl Fn(&T) -> String) -> Vec<T> {
    let mut index_by_id: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        match index_by_id.entry(id_of(&item)) {
            Entry::Occupied(slot) => out[*slot.get()] = item,
            Entry::Vacant(vacant) => {
                vacant.insert(out.len());
                out.push(item);
            }
        }
    }
    out
}
