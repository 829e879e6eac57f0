//! Grid state and orchestration.
//!
//! [`CalendarGrid`] owns the ephemeral UI state of the view layer: the
//! active view mode, the selected date, the in-progress drag and the last
//! computed "now". The pushed collections stay outside; every layout call
//! takes them as an immutable snapshot for that render pass.

use chrono::NaiveDate;
use egui::Pos2;

use crate::models::event::Event;
use crate::services::store::CalendarStore;
use crate::utils::date::shift_month_preserving_day;
use crate::views::day_view::{self, DayLayout};
use crate::views::drag::{dispatch_reschedule, DragController, DragOutcome, DragSurface};
use crate::views::month_view::{layout_month, MonthLayout};
use crate::views::now_indicator::{NowIndicator, NowMarker};
use crate::views::types::GridAction;
use crate::views::week_view::{layout_week, WeekLayout};
use crate::views::ViewMode;

/// Layout output for the active view mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewLayout {
    Day(DayLayout),
    Week(WeekLayout),
    Month(MonthLayout),
}

/// The calendar grid's owned interaction state.
pub struct CalendarGrid {
    view_mode: ViewMode,
    selected_date: NaiveDate,
    first_day_of_week: u8,
    drag: DragController,
    now: NowIndicator,
}

impl CalendarGrid {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            view_mode: ViewMode::Week,
            selected_date,
            first_day_of_week: 0,
            drag: DragController::new(),
            now: NowIndicator::new(),
        }
    }

    /// Override the week start (0 = Sunday, 1 = Monday, ...).
    pub fn with_first_day_of_week(mut self, first_day_of_week: u8) -> Self {
        self.first_day_of_week = first_day_of_week;
        self
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch views. Transitions happen only through this explicit call.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Step backwards by one unit of the active view.
    pub fn navigate_previous(&mut self) {
        self.selected_date = match self.view_mode {
            ViewMode::Day => self.selected_date - chrono::Duration::days(1),
            ViewMode::Week => self.selected_date - chrono::Duration::weeks(1),
            ViewMode::Month => shift_month_preserving_day(self.selected_date, -1),
        };
    }

    /// Step forwards by one unit of the active view.
    pub fn navigate_next(&mut self) {
        self.selected_date = match self.view_mode {
            ViewMode::Day => self.selected_date + chrono::Duration::days(1),
            ViewMode::Week => self.selected_date + chrono::Duration::weeks(1),
            ViewMode::Month => shift_month_preserving_day(self.selected_date, 1),
        };
    }

    pub fn jump_to_today(&mut self) {
        self.selected_date = self.now.now().date_naive();
    }

    /// Lay out the given collection snapshot for the active view.
    pub fn layout(&self, events: &[Event]) -> ViewLayout {
        match self.view_mode {
            ViewMode::Day => ViewLayout::Day(day_view::layout_day(self.selected_date, events)),
            ViewMode::Week => ViewLayout::Week(layout_week(
                self.selected_date,
                self.first_day_of_week,
                events,
            )),
            ViewMode::Month => ViewLayout::Month(layout_month(
                self.selected_date,
                self.first_day_of_week,
                events,
            )),
        }
    }

    /// Recompute "now" from the wall clock; called on the 60-second tick.
    pub fn tick(&mut self) {
        self.now.tick();
    }

    /// Recompute "now" from an injected clock.
    pub fn tick_at(&mut self, now: chrono::DateTime<chrono::Local>) {
        self.now.tick_at(now);
    }

    /// Current-time marker for the active view, if it shows one.
    pub fn now_marker(&self) -> Option<NowMarker> {
        self.now
            .marker(self.view_mode, self.selected_date, self.first_day_of_week)
    }

    /// Resolve an empty-slot click in a day/week column into a create
    /// request. Month mode has no time grid, and clicks above the grid top
    /// resolve to nothing.
    pub fn click_time_grid(&self, column_date: NaiveDate, y: f32) -> Option<GridAction> {
        if self.view_mode == ViewMode::Month {
            return None;
        }
        day_view::click_slot(column_date, y).map(GridAction::CreateAtTime)
    }

    /// Resolve a month cell click into a date-only create request. The
    /// literal cell date is kept even for the dimmed out-of-month cells.
    pub fn click_month_cell(&self, cell_date: NaiveDate) -> GridAction {
        GridAction::CreateOnDate(cell_date)
    }

    /// Arm a drag from a pointer-down on an event block.
    pub fn begin_drag(&mut self, surface: &mut dyn DragSurface, event: &Event, pointer: Pos2) {
        self.drag.pointer_down(surface, event, pointer);
    }

    /// Live ghost top for the in-progress drag, if any.
    pub fn drag_ghost_top(&self, surface: &dyn DragSurface, pointer: Pos2) -> Option<f32> {
        self.drag.pointer_move(surface, pointer)
    }

    pub fn drag_in_progress(&self) -> bool {
        self.drag.is_armed()
    }

    /// Resolve a pointer-up. A resulting reschedule is dispatched to the
    /// store fire-and-forget; the authoritative display update arrives with
    /// the next push.
    pub fn complete_drag(
        &mut self,
        surface: &mut dyn DragSurface,
        pointer: Pos2,
        store: &dyn CalendarStore,
    ) -> DragOutcome {
        let outcome = self.drag.pointer_up(surface, pointer);
        if let DragOutcome::Reschedule(request) = &outcome {
            dispatch_reschedule(store, request);
        }
        outcome
    }

    /// Unmount path for the interaction surface.
    pub fn cancel_drag(&mut self, surface: &mut dyn DragSurface) {
        self.drag.cancel(surface);
    }
}
