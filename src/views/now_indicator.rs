//! Current-time marker.
//!
//! A fixed 60-second tick recomputes "now"; the marker's pixel offset comes
//! from the shared grid geometry. Purely time-driven: the tick neither reads
//! nor touches drag or sync state.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Local, NaiveDate};

use crate::utils::date::{end_of_day, local_midnight, week_start};
use crate::views::geometry::time_to_top;
use crate::views::ViewMode;

/// Fixed period the driving shell uses to call [`NowIndicator::tick`].
pub const TICK_INTERVAL: StdDuration = StdDuration::from_secs(60);

/// Horizontal marker line at the current time, spanning the full grid width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NowMarker {
    pub top: f32,
}

/// Holds the last computed "now" between ticks.
pub struct NowIndicator {
    now: DateTime<Local>,
}

impl Default for NowIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl NowIndicator {
    pub fn new() -> Self {
        Self { now: Local::now() }
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    /// Recompute "now" from the wall clock.
    pub fn tick(&mut self) {
        self.tick_at(Local::now());
    }

    /// Recompute "now" from an injected clock.
    pub fn tick_at(&mut self, now: DateTime<Local>) {
        self.now = now;
    }

    /// Marker for the active view, or `None` when the view does not show
    /// one: day view only when "now" is the selected date, week view only
    /// when "now" falls inside the displayed week (inclusive of the last
    /// day's end), month view never.
    pub fn marker(
        &self,
        view_mode: ViewMode,
        selected_date: NaiveDate,
        first_day_of_week: u8,
    ) -> Option<NowMarker> {
        let visible = match view_mode {
            ViewMode::Day => self.now.date_naive() == selected_date,
            ViewMode::Week => {
                let start = local_midnight(week_start(selected_date, first_day_of_week));
                let end = end_of_day(start + chrono::Duration::days(6));
                self.now >= start && self.now <= end
            }
            ViewMode::Month => false,
        };

        visible.then(|| NowMarker {
            top: time_to_top(self.now),
        })
    }
}
