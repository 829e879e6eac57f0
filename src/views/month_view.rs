//! Month view layout.
//!
//! A fixed 6x7 grid of day cells covering the whole month, padded with
//! dimmed leading/trailing days from the adjacent months. Cells carry plain
//! event lists in payload order; there is no time geometry at this
//! granularity.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::event::Event;
use crate::utils::date::month_grid_start;
use crate::views::week_view::DAYS_PER_WEEK;

pub const MONTH_GRID_WEEKS: usize = 6;

/// One day cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell {
    pub date: NaiveDate,
    /// False for the dimmed leading/trailing days of adjacent months.
    pub in_month: bool,
    /// Events starting on this date, in payload order.
    pub events: Vec<Event>,
}

/// Laid-out month: 42 cells, row-major from the grid start.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub cells: Vec<MonthCell>,
}

impl MonthLayout {
    pub fn cell(&self, row: usize, column: usize) -> &MonthCell {
        &self.cells[row * DAYS_PER_WEEK + column]
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&MonthCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

/// Lay out the month containing `selected`.
pub fn layout_month(selected: NaiveDate, first_day_of_week: u8, events: &[Event]) -> MonthLayout {
    let grid_start = month_grid_start(selected, first_day_of_week);
    let cells = (0..(MONTH_GRID_WEEKS * DAYS_PER_WEEK) as i64)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            MonthCell {
                date,
                in_month: date.month() == selected.month() && date.year() == selected.year(),
                events: events
                    .iter()
                    .filter(|event| super::starts_on(event, date))
                    .cloned()
                    .collect(),
            }
        })
        .collect();
    MonthLayout { cells }
}

/// Weekday header labels in column order for the given week start.
pub fn day_names(first_day_of_week: u8) -> [&'static str; DAYS_PER_WEEK] {
    const NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    let mut out = [""; DAYS_PER_WEEK];
    for (index, slot) in out.iter_mut().enumerate() {
        *slot = NAMES[(first_day_of_week as usize + index) % DAYS_PER_WEEK];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventKind;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn event_on(id: &str, y: i32, m: u32, d: u32) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            start: Local.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap(),
            end: Local.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap(),
            kind: EventKind::InPerson,
            location: Some("Office".to_string()),
            meeting_url: None,
            calendar_id: "cal-1".to_string(),
            is_live: false,
            owner_id: "user-1".to_string(),
        }
    }

    #[test]
    fn test_grid_is_always_six_weeks() {
        let selected = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let layout = layout_month(selected, 0, &[]);
        assert_eq!(layout.cells.len(), MONTH_GRID_WEEKS * DAYS_PER_WEEK);
    }

    #[test]
    fn test_leading_and_trailing_days_are_dimmed() {
        // March 2025 with a Sunday start: grid runs Feb 23 through Apr 5.
        let selected = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let layout = layout_month(selected, 0, &[]);

        let first = &layout.cells[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 2, 23).unwrap());
        assert!(!first.in_month);

        let last = layout.cells.last().unwrap();
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2025, 4, 5).unwrap());
        assert!(!last.in_month);

        assert!(layout
            .cell_for(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .unwrap()
            .in_month);
        assert!(layout
            .cell_for(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap())
            .unwrap()
            .in_month);
    }

    #[test]
    fn test_cells_list_events_starting_on_their_date() {
        let selected = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let events = vec![
            event_on("a", 2025, 3, 10),
            event_on("b", 2025, 3, 10),
            event_on("other-month", 2025, 2, 24),
        ];
        let layout = layout_month(selected, 0, &events);

        let cell = layout
            .cell_for(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
            .unwrap();
        let ids: Vec<&str> = cell.events.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        // Events on visible out-of-month days still land in their cell.
        let leading = layout
            .cell_for(NaiveDate::from_ymd_opt(2025, 2, 24).unwrap())
            .unwrap();
        assert_eq!(leading.events.len(), 1);
        assert!(!leading.in_month);
    }

    #[test]
    fn test_cell_indexing_is_row_major() {
        let selected = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let layout = layout_month(selected, 0, &[]);
        assert_eq!(
            layout.cell(1, 0).date,
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_day_names_respect_week_start() {
        assert_eq!(day_names(0)[0], "Sun");
        assert_eq!(day_names(1)[0], "Mon");
        assert_eq!(day_names(1)[6], "Sun");
    }
}
