//! Calendar view layer.
//!
//! Layout builders for the three view modes, the time-grid geometry they
//! share, the drag state machine, and the current-time marker. Everything
//! here is headless: the modules produce positioned structures and
//! interaction decisions; an embedding shell paints them.

use chrono::NaiveDate;

use crate::models::event::Event;

pub mod day_view;
pub mod drag;
pub mod geometry;
pub mod grid;
pub mod month_view;
pub mod now_indicator;
pub mod palette;
pub mod types;
pub mod week_view;

/// Calendar view modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Day,
    Week,
    Month,
}

/// Whether `event` belongs in the column or cell for `date`.
///
/// Placement keys off the start only: an event whose interval crosses
/// midnight appears on its start day and nowhere else.
pub(crate) fn starts_on(event: &Event, date: NaiveDate) -> bool {
    event.start.date_naive() == date
}
