//! Time <-> pixel conversion for the time grid.
//!
//! One hour of wall-clock time is sixty pixels of column; the grid shows the
//! full day in 24 rows below a small header offset. All conversions here are
//! pure; the snap policies are the only place raw positions get quantized.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Timelike};

use crate::models::event::Event;
use crate::utils::date::local_midnight;

/// Vertical pixels per hour of wall-clock time.
pub const PIXELS_PER_HOUR: f32 = 60.0;

/// Header padding above the first hour row.
pub const TOP_OFFSET: f32 = 8.0;

/// First hour row shown in day/week columns.
pub const FIRST_HOUR: u32 = 0;

/// Last hour row shown in day/week columns (inclusive).
pub const LAST_HOUR: u32 = 23;

/// Snap increment for both placement policies.
pub const SNAP_MINUTES: i64 = 15;

/// Shortest rendered block, in minutes. Degenerate intervals still get a
/// clickable block; storage is never mutated to match.
pub const MIN_RENDER_MINUTES: f32 = 15.0;

/// Minutes elapsed since local midnight of `t`'s own date.
pub fn minutes_since_midnight(t: DateTime<Local>) -> f32 {
    t.hour() as f32 * 60.0 + t.minute() as f32 + t.second() as f32 / 60.0
}

/// Pixel offset of the grid row for time `t`.
pub fn time_to_top(t: DateTime<Local>) -> f32 {
    TOP_OFFSET + minutes_since_midnight(t) / 60.0 * PIXELS_PER_HOUR
}

/// Rendered block height for an interval, with the minimum-visible floor
/// applied.
pub fn duration_to_height(start: DateTime<Local>, end: DateTime<Local>) -> f32 {
    let duration_minutes = (end - start).num_seconds() as f32 / 60.0;
    duration_minutes.max(MIN_RENDER_MINUTES) / 60.0 * PIXELS_PER_HOUR
}

/// Inverse of [`time_to_top`]: minutes since midnight for a pixel offset
/// measured from the top of the grid (header offset included). Exact before
/// snapping.
pub fn pixel_to_minutes(px: f32) -> f32 {
    (px - TOP_OFFSET) / PIXELS_PER_HOUR * 60.0
}

/// Floor snap, used for fresh placement from a single click: the slot the
/// pointer is inside wins.
pub fn snap_floor(minutes: f32) -> i64 {
    (minutes / SNAP_MINUTES as f32).floor() as i64 * SNAP_MINUTES
}

/// Nearest snap, used for drag completion: the drop corrects to the closest
/// grid line. Exact half-increments round away from zero.
pub fn snap_nearest(minutes: f32) -> i64 {
    (minutes / SNAP_MINUTES as f32).round() as i64 * SNAP_MINUTES
}

/// Resolve a grid-local click into a concrete start time on `date`, snapped
/// to the slot being pointed into. Clicks above the first row map to
/// nothing.
pub fn click_to_slot(date: NaiveDate, y: f32) -> Option<DateTime<Local>> {
    let raw_minutes = pixel_to_minutes(y);
    if raw_minutes < 0.0 {
        return None;
    }
    let snapped = snap_floor(raw_minutes);
    Some(local_midnight(date) + chrono::Duration::minutes(snapped))
}

/// Top/height pair for one event block under the single-column layout.
pub fn event_block_geometry(event: &Event) -> (f32, f32) {
    (
        time_to_top(event.start),
        duration_to_height(event.start, event.end),
    )
}

/// Gutter label for an hour row, in the 12-hour clock of the layout.
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{} AM", h),
        h => format!("{} PM", h - 12),
    }
}

/// The time-of-day of a grid row, for shells that label or hit-test rows.
pub fn hour_row_time(hour: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, 0, 0)
}
