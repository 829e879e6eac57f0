//! Day view layout.
//!
//! One column spanning the 24 hour rows. An event is included iff its start
//! falls on the selected local date; interval overlap is deliberately not
//! checked, so an event running past midnight shows only on its start day.

use chrono::{DateTime, Local, NaiveDate};

use crate::models::event::Event;
use crate::views::geometry;
use crate::views::types::EventBlock;

/// Laid-out column for a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub date: NaiveDate,
    /// Blocks in payload order; single-column, full width.
    pub blocks: Vec<EventBlock>,
}

impl DayLayout {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Lay out the events whose start falls on `date`.
pub fn layout_day(date: NaiveDate, events: &[Event]) -> DayLayout {
    let blocks = events
        .iter()
        .filter(|event| super::starts_on(event, date))
        .map(EventBlock::from_event)
        .collect();
    DayLayout { date, blocks }
}

/// Resolve an empty-slot click at grid-local `y` into a create time.
pub fn click_slot(date: NaiveDate, y: f32) -> Option<DateTime<Local>> {
    geometry::click_to_slot(date, y)
}
