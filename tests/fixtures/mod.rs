// Test fixtures - reusable test data
// Provides consistent sample owners, calendars and events across test files

use chrono::{DateTime, Local, TimeZone};

use calgrid::models::event::EventKind;
use calgrid::services::store::{millis_from_local, CalendarRecord, EventRecord};

pub const OWNER: &str = "user-1";
pub const OTHER_OWNER: &str = "user-2";

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, March 10, 2025 at the given time
    pub fn monday_at(hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 3, 10, hour, minute, 0)
            .unwrap()
    }

    /// Tuesday, March 11, 2025 at the given time
    pub fn tuesday_at(hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 3, 11, hour, minute, 0)
            .unwrap()
    }
}

/// Work calendar document for the primary test owner
pub fn work_calendar() -> CalendarRecord {
    CalendarRecord {
        id: "cal-work".to_string(),
        name: "Work".to_string(),
        color: "indigo".to_string(),
        user_id: OWNER.to_string(),
    }
}

/// Event document on the work calendar
pub fn stored_event(
    id: &str,
    title: &str,
    start: DateTime<Local>,
    end: DateTime<Local>,
) -> EventRecord {
    EventRecord {
        id: id.to_string(),
        title: title.to_string(),
        start: millis_from_local(start),
        end: millis_from_local(end),
        kind: EventKind::InPerson,
        location: Some("Office".to_string()),
        meeting_url: None,
        calendar_id: "cal-work".to_string(),
        is_live: false,
        user_id: OWNER.to_string(),
    }
}

/// Online event document owned by the secondary test owner
pub fn other_owner_event(id: &str, start: DateTime<Local>, end: DateTime<Local>) -> EventRecord {
    EventRecord {
        id: id.to_string(),
        title: "Someone else's meeting".to_string(),
        start: millis_from_local(start),
        end: millis_from_local(end),
        kind: EventKind::Online,
        location: None,
        meeting_url: Some("https://meet.example/other".to_string()),
        calendar_id: "cal-other".to_string(),
        is_live: true,
        user_id: OTHER_OWNER.to_string(),
    }
}
