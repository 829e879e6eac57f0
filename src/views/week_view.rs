//! Week view layout.
//!
//! Seven day columns for the calendar week containing the selected date.
//! Each column is filtered and laid out exactly like the day view; the
//! current-time marker is shared across the whole grid.

use chrono::{Duration, NaiveDate};

use crate::models::event::Event;
use crate::utils::date::week_start;
use crate::views::day_view::{layout_day, DayLayout};

pub const DAYS_PER_WEEK: usize = 7;

/// Laid-out week: always seven columns, leftmost at the week start.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub days: Vec<DayLayout>,
}

impl WeekLayout {
    /// Date of the leftmost column.
    pub fn start(&self) -> NaiveDate {
        self.days[0].date
    }

    /// Date of the rightmost column.
    pub fn end(&self) -> NaiveDate {
        self.days[DAYS_PER_WEEK - 1].date
    }

    /// Column index for a date, if it falls inside the displayed week.
    pub fn column_for(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|day| day.date == date)
    }
}

/// Lay out the week containing `selected`.
pub fn layout_week(selected: NaiveDate, first_day_of_week: u8, events: &[Event]) -> WeekLayout {
    let start = week_start(selected, first_day_of_week);
    let days = (0..DAYS_PER_WEEK as i64)
        .map(|offset| layout_day(start + Duration::days(offset), events))
        .collect();
    WeekLayout { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventKind;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn event_on(id: &str, d: u32, start_hour: u32) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            start: Local.with_ymd_and_hms(2024, 12, d, start_hour, 0, 0).unwrap(),
            end: Local
                .with_ymd_and_hms(2024, 12, d, start_hour + 1, 0, 0)
                .unwrap(),
            kind: EventKind::Online,
            location: None,
            meeting_url: Some("https://meet.example/w".to_string()),
            calendar_id: "cal-1".to_string(),
            is_live: false,
            owner_id: "user-1".to_string(),
        }
    }

    #[test]
    fn test_week_spans_seven_columns_from_week_start() {
        // Wednesday, Dec 4, 2024; Sunday-start week runs Dec 1..=Dec 7.
        let selected = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let layout = layout_week(selected, 0, &[]);
        assert_eq!(layout.days.len(), DAYS_PER_WEEK);
        assert_eq!(layout.start(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(layout.end(), NaiveDate::from_ymd_opt(2024, 12, 7).unwrap());
    }

    #[test]
    fn test_events_land_in_their_own_columns() {
        let selected = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let events = vec![
            event_on("sun", 1, 9),
            event_on("wed", 4, 14),
            event_on("outside", 9, 9),
        ];
        let layout = layout_week(selected, 0, &events);

        assert_eq!(layout.days[0].blocks.len(), 1);
        assert_eq!(layout.days[0].blocks[0].event.id, "sun");
        assert_eq!(layout.days[3].blocks.len(), 1);
        assert_eq!(layout.days[3].blocks[0].event.id, "wed");

        let total: usize = layout.days.iter().map(|day| day.blocks.len()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_column_lookup() {
        let selected = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let layout = layout_week(selected, 0, &[]);
        assert_eq!(
            layout.column_for(NaiveDate::from_ymd_opt(2024, 12, 4).unwrap()),
            Some(3)
        );
        assert_eq!(
            layout.column_for(NaiveDate::from_ymd_opt(2024, 12, 9).unwrap()),
            None
        );
    }

    #[test]
    fn test_monday_start_shifts_columns() {
        let selected = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let layout = layout_week(selected, 1, &[]);
        assert_eq!(layout.start(), NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
        assert_eq!(layout.end(), NaiveDate::from_ymd_opt(2024, 12, 8).unwrap());
    }
}
