// Calendar Grid Demo
// Headless smoke harness: seeds an in-memory store, attaches the live sync
// subscriptions, prints the week layout and replays one drag-to-reschedule.

use chrono::{Duration, Local};
use egui::{pos2, vec2, Rect};

use calgrid::models::event::EventKind;
use calgrid::services::live_sync::LiveSyncManager;
use calgrid::services::store::memory::InMemoryStore;
use calgrid::services::store::{CalendarDraft, CalendarStore, EventDraft};
use calgrid::models::calendar::CalendarColor;
use calgrid::views::drag::DragSurface;
use calgrid::views::geometry;
use calgrid::views::grid::{CalendarGrid, ViewLayout};

const OWNER: &str = "demo-user";

/// Always-mounted surface covering one fixed grid rect.
struct DemoSurface {
    rect: Rect,
}

impl DragSurface for DemoSurface {
    fn grid_rect(&self) -> Option<Rect> {
        Some(self.rect)
    }

    fn capture_pointer(&mut self) {}

    fn release_pointer(&mut self) {}
}

fn main() {
    // Initialize logging
    env_logger::init();

    log::info!("Starting calendar grid demo");

    let store = InMemoryStore::new();
    let calendar_id = store
        .create_calendar(CalendarDraft {
            name: "Personal".to_string(),
            color: CalendarColor::Indigo,
            owner_id: OWNER.to_string(),
        })
        .expect("in-memory create cannot fail");

    let today = Local::now();
    for (title, start_hour, duration_minutes) in
        [("Standup", 9, 15), ("Design review", 11, 60), ("1:1", 15, 30)]
    {
        let start = today.date_naive().and_hms_opt(start_hour, 0, 0).unwrap();
        let start = start.and_local_timezone(Local).unwrap();
        store
            .create_event(EventDraft {
                title: title.to_string(),
                start,
                end: start + Duration::minutes(duration_minutes),
                kind: EventKind::InPerson,
                location: Some("Office".to_string()),
                meeting_url: None,
                calendar_id: calendar_id.clone(),
                is_live: false,
                owner_id: OWNER.to_string(),
            })
            .expect("in-memory create cannot fail");
    }

    let mut sync = LiveSyncManager::new();
    sync.set_owner(&store, Some(OWNER));

    let mut grid = CalendarGrid::new(today.date_naive());
    let snapshot = sync.snapshot();

    if let ViewLayout::Week(week) = grid.layout(&snapshot.events) {
        println!("Week of {} ({} calendars)", week.start(), snapshot.calendars.len());
        for day in &week.days {
            for block in &day.blocks {
                println!(
                    "  {}  {:>6.1}px +{:>5.1}px  {}",
                    day.date, block.top, block.height, block.event.title
                );
            }
        }
    }

    // Replay a drag: grab the first event and pull it 61px down, which
    // snaps to a one-hour move.
    let events = sync.events();
    let dragged = events.first().expect("seeded events are present");
    let mut surface = DemoSurface {
        rect: Rect::from_min_size(pos2(0.0, 0.0), vec2(700.0, 1500.0)),
    };
    let down = pos2(10.0, geometry::time_to_top(dragged.start) + 4.0);
    grid.begin_drag(&mut surface, dragged, down);
    let outcome = grid.complete_drag(&mut surface, pos2(10.0, down.y + 61.0), &store);
    println!("Drag outcome: {:?}", outcome);

    let moved = sync
        .events()
        .into_iter()
        .find(|event| event.id == dragged.id)
        .expect("event still present after push");
    println!(
        "{} now runs {} - {}",
        moved.title,
        moved.start.format("%H:%M"),
        moved.end.format("%H:%M")
    );

    if let Some(record) = store.event_record(&moved.id) {
        println!(
            "Stored document: {}",
            serde_json::to_string_pretty(&record).expect("records serialize")
        );
    }

    sync.detach();
    log::info!("Demo finished");
}
